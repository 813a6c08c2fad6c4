use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::backend::{Frame, PlaneGeometry, RenderBackend, Viewport};
use crate::export::ExportError;
use crate::uniforms::{Uniform, COLOR_SLOTS};

const VERTEX_SHADER: &str = include_str!("shaders/gradient.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/gradient.frag");

const POSITION_ATTRIB: u32 = 0;
const UV_ATTRIB: u32 = 1;

#[derive(Default)]
struct Locations {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    colors: Vec<Option<WebGlUniformLocation>>,
    time: Option<WebGlUniformLocation>,
    amount: Option<WebGlUniformLocation>,
    speed: Option<WebGlUniformLocation>,
    frequency: Option<WebGlUniformLocation>,
    enable_grain: Option<WebGlUniformLocation>,
}

/// WebGL2 implementation of [`RenderBackend`] drawing into one canvas.
pub struct WebGlBackend {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    _position_buffer: WebGlBuffer,
    _uv_buffer: WebGlBuffer,
    triangles: WebGlBuffer,
    triangle_count: i32,
    lines: WebGlBuffer,
    line_count: i32,
    locations: Locations,
}

impl WebGlBackend {
    pub fn new(canvas: HtmlCanvasElement, geometry: &PlaneGeometry) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        gl.enable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);

        let program = link_program(&gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        let vao = gl
            .create_vertex_array()
            .ok_or("failed to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));
        let position_buffer = upload_attribute(&gl, POSITION_ATTRIB, 3, &geometry.positions())?;
        let uv_buffer = upload_attribute(&gl, UV_ATTRIB, 2, &geometry.uvs())?;
        gl.bind_vertex_array(None);

        let triangle_indices = geometry.triangle_indices();
        let line_indices = geometry.line_indices();
        let triangles = upload_indices(&gl, &triangle_indices)?;
        let lines = upload_indices(&gl, &line_indices)?;

        let mut backend = Self {
            gl,
            canvas,
            program,
            vao,
            _position_buffer: position_buffer,
            _uv_buffer: uv_buffer,
            triangles,
            triangle_count: triangle_indices.len() as i32,
            lines,
            line_count: line_indices.len() as i32,
            locations: Locations::default(),
        };
        backend.locations = backend.cache_locations();
        log::info!(
            "plane uploaded: {} vertices, {} triangles",
            geometry.vertex_count(),
            triangle_indices.len() / 3
        );
        Ok(backend)
    }

    fn location(&self, name: &str) -> Option<WebGlUniformLocation> {
        let loc = self.gl.get_uniform_location(&self.program, name);
        if loc.is_none() {
            log::debug!("uniform {name} not active in program");
        }
        loc
    }

    fn uniform_location(&self, uniform: Uniform) -> Option<WebGlUniformLocation> {
        uniform.glsl_name().and_then(|name| self.location(&name))
    }

    fn cache_locations(&self) -> Locations {
        Locations {
            model: self.location("uModelMatrix"),
            view: self.location("uViewMatrix"),
            projection: self.location("uProjectionMatrix"),
            colors: (0..COLOR_SLOTS)
                .map(|slot| self.uniform_location(Uniform::Color(slot)))
                .collect(),
            time: self.uniform_location(Uniform::Time),
            amount: self.uniform_location(Uniform::Amount),
            speed: self.uniform_location(Uniform::Speed),
            frequency: self.uniform_location(Uniform::Frequency),
            enable_grain: self.uniform_location(Uniform::EnableGrain),
        }
    }
}

impl RenderBackend for WebGlBackend {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn render(&mut self, frame: &Frame<'_>) {
        let gl = &self.gl;
        let u = frame.uniforms;
        let loc = &self.locations;

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        for (location, matrix) in [
            (&loc.model, frame.model),
            (&loc.view, frame.view),
            (&loc.projection, frame.projection),
        ] {
            gl.uniform_matrix4fv_with_f32_array(location.as_ref(), false, &matrix.to_cols_array());
        }
        for (slot, [r, g, b]) in loc.colors.iter().zip(u.colors) {
            gl.uniform3f(slot.as_ref(), r, g, b);
        }
        gl.uniform1f(loc.time.as_ref(), u.time);
        gl.uniform1f(loc.amount.as_ref(), u.amount);
        gl.uniform1f(loc.speed.as_ref(), u.speed);
        gl.uniform2f(loc.frequency.as_ref(), u.frequency[0], u.frequency[1]);
        gl.uniform1i(loc.enable_grain.as_ref(), u.enable_grain as i32);

        let (mode, buffer, count) = if u.wireframe {
            (GL::LINES, &self.lines, self.line_count)
        } else {
            (GL::TRIANGLES, &self.triangles, self.triangle_count)
        };
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(buffer));
        gl.draw_elements_with_i32(mode, count, GL::UNSIGNED_INT, 0);
        gl.bind_vertex_array(None);

        let status = gl.get_error();
        if status != GL::NO_ERROR {
            log::error!("draw failed with GL error 0x{status:04x}");
        }
    }

    fn read_png_data_url(&self) -> Result<String, ExportError> {
        self.canvas
            .to_data_url_with_type("image/png")
            .map_err(|err| ExportError::Serialize(format!("{err:?}")))
    }
}

fn upload_attribute(gl: &GL, index: u32, size: i32, data: &[f32]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl.create_buffer().ok_or("failed to create vertex buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    // `view` aliases wasm memory; nothing may allocate before the upload.
    unsafe {
        let view = Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, false, 0, 0);
    gl.enable_vertex_attrib_array(index);
    Ok(buffer)
}

fn upload_indices(gl: &GL, data: &[u32]) -> Result<WebGlBuffer, JsValue> {
    let buffer = gl.create_buffer().ok_or("failed to create index buffer")?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));
    unsafe {
        let view = Uint32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, None);
    Ok(buffer)
}

fn link_program(gl: &GL, vertex_src: &str, fragment_src: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl.create_program().ok_or("failed to create program")?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.bind_attrib_location(&program, POSITION_ATTRIB, "position");
    gl.bind_attrib_location(&program, UV_ATTRIB, "uv");
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    gl.detach_shader(&program, &vertex);
    gl.detach_shader(&program, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    if linked {
        Ok(program)
    } else {
        let info = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown program error".to_string());
        Err(JsValue::from_str(&format!("failed to link program: {info}")))
    }
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(shader_type).ok_or("failed to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown shader error".to_string());
        Err(JsValue::from_str(&format!("failed to compile shader: {info}")))
    }
}
