//! Shader program binding: owns the uniform set, the plane and the backend.

use crate::backend::{Frame, PlaneGeometry, RenderBackend, Viewport};
use crate::camera::CameraRig;
use crate::export::ExportError;
use crate::params::{Param, Value};
use crate::uniforms::{Uniform, UniformError, UniformSet, UniformValue, COLOR_SLOTS};

/// Uniform fed by a parameter, if any.
///
/// Colors past the third slot, the camera pose and the edit flag are
/// store-only and have no uniform. Colors beyond the active count are
/// filtered out by [`ShaderBinding::apply`].
pub fn uniform_for(param: Param) -> Option<Uniform> {
    match param {
        p if p.is_color() => p
            .color_index()
            .filter(|&i| i < COLOR_SLOTS)
            .map(Uniform::Color),
        Param::Wireframe => Some(Uniform::Wireframe),
        Param::Grain => Some(Uniform::EnableGrain),
        Param::NoiseAmount => Some(Uniform::Amount),
        Param::NoiseSpeed => Some(Uniform::Speed),
        Param::NoiseFrequency => Some(Uniform::Frequency),
        _ => None,
    }
}

impl From<Value> for UniformValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Color(c) => UniformValue::Vec3(c.to_array()),
            Value::Bool(b) => UniformValue::Bool(b),
            Value::Scalar(v) => UniformValue::Float(v),
            Value::Vec2(v) => UniformValue::Vec2(v),
            Value::Vec3(v) => UniformValue::Vec3(v),
        }
    }
}

#[derive(Debug)]
pub struct ShaderBinding<B> {
    backend: B,
    geometry: PlaneGeometry,
    uniforms: UniformSet,
    active_colors: usize,
}

impl<B: RenderBackend> ShaderBinding<B> {
    /// `active_colors` is how many color parameters the panel exposes. With
    /// fewer than three, the last active color also fills the spare slots.
    pub fn new(backend: B, geometry: PlaneGeometry, active_colors: usize) -> Self {
        Self {
            backend,
            geometry,
            uniforms: UniformSet::default(),
            active_colors: active_colors.max(1),
        }
    }

    pub fn set_uniform(
        &mut self,
        uniform: Uniform,
        value: UniformValue,
    ) -> Result<(), UniformError> {
        self.uniforms.set(uniform, value)
    }

    /// Pushes a parameter value into its uniform. Store-only parameters and
    /// inactive colors are a no-op.
    pub fn apply(&mut self, param: Param, value: Value) -> Result<(), UniformError> {
        if let Some(index) = param.color_index() {
            return self.apply_color(index, value);
        }
        match uniform_for(param) {
            Some(uniform) => self.set_uniform(uniform, value.into()),
            None => Ok(()),
        }
    }

    fn apply_color(&mut self, index: usize, value: Value) -> Result<(), UniformError> {
        if index >= self.active_colors {
            return Ok(());
        }
        let last = if index + 1 == self.active_colors {
            COLOR_SLOTS
        } else {
            index + 1
        };
        for slot in index..last.min(COLOR_SLOTS) {
            self.set_uniform(Uniform::Color(slot), value.into())?;
        }
        Ok(())
    }

    pub fn active_colors(&self) -> usize {
        self.active_colors
    }

    pub fn advance_time(&mut self, elapsed_seconds: f32) {
        self.uniforms.time = elapsed_seconds;
    }

    pub fn draw(&mut self, camera: &CameraRig) {
        let frame = Frame {
            geometry: &self.geometry,
            uniforms: &self.uniforms,
            model: self.geometry.model_matrix(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_position: camera.position(),
        };
        self.backend.render(&frame);
    }

    pub fn resize(&mut self, viewport: &Viewport) {
        self.backend.resize(viewport);
    }

    pub fn read_png_data_url(&self) -> Result<String, ExportError> {
        self.backend.read_png_data_url()
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn geometry(&self) -> &PlaneGeometry {
        &self.geometry
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
