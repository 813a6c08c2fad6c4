//! Seam between the playground and whatever actually puts pixels on screen.

use glam::{Mat4, Vec3};

use crate::export::ExportError;
use crate::uniforms::UniformSet;

/// Size of the output surface in CSS pixels plus the clamped pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: ratio.min(max_pixel_ratio),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Drawing buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// Flat plane centered on the origin in the XY plane, subdivided into a grid.
///
/// Vertex layout and winding follow the usual `PlaneGeometry` convention: rows
/// run top to bottom, `uv.y` is flipped so `(0, 0)` is the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub segments_x: u32,
    pub segments_y: u32,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        Self {
            width,
            height,
            segments_x: segments_x.max(1),
            segments_y: segments_y.max(1),
        }
    }

    pub fn vertex_count(&self) -> usize {
        ((self.segments_x + 1) * (self.segments_y + 1)) as usize
    }

    /// Interleaved `x, y, z` per vertex.
    pub fn positions(&self) -> Vec<f32> {
        let (gx, gy) = (self.segments_x, self.segments_y);
        let (half_w, half_h) = (self.width * 0.5, self.height * 0.5);
        let (seg_w, seg_h) = (self.width / gx as f32, self.height / gy as f32);
        let mut out = Vec::with_capacity(self.vertex_count() * 3);
        for iy in 0..=gy {
            let y = iy as f32 * seg_h - half_h;
            for ix in 0..=gx {
                let x = ix as f32 * seg_w - half_w;
                out.extend_from_slice(&[x, -y, 0.0]);
            }
        }
        out
    }

    pub fn uvs(&self) -> Vec<f32> {
        let (gx, gy) = (self.segments_x, self.segments_y);
        let mut out = Vec::with_capacity(self.vertex_count() * 2);
        for iy in 0..=gy {
            for ix in 0..=gx {
                out.extend_from_slice(&[ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32]);
            }
        }
        out
    }

    pub fn triangle_indices(&self) -> Vec<u32> {
        let (gx, gy) = (self.segments_x, self.segments_y);
        let row = gx + 1;
        let mut out = Vec::with_capacity((gx * gy * 6) as usize);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;
                out.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        out
    }

    /// Unique triangle edges as line pairs, for wireframe drawing.
    pub fn line_indices(&self) -> Vec<u32> {
        let (gx, gy) = (self.segments_x, self.segments_y);
        let row = gx + 1;
        let mut out = Vec::new();
        for iy in 0..=gy {
            for ix in 0..=gx {
                let a = ix + row * iy;
                if ix < gx {
                    out.extend_from_slice(&[a, a + 1]);
                }
                if iy < gy {
                    out.extend_from_slice(&[a, a + row]);
                }
                if ix < gx && iy < gy {
                    out.extend_from_slice(&[a + row, a + 1]);
                }
            }
        }
        out
    }

    /// Lays the plane flat and turns it 45 degrees so the camera sees a diamond.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
            * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4)
    }
}

/// Everything one draw call needs.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub geometry: &'a PlaneGeometry,
    pub uniforms: &'a UniformSet,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
}

pub trait RenderBackend {
    fn resize(&mut self, viewport: &Viewport);

    fn render(&mut self, frame: &Frame<'_>);

    /// Encodes the most recently rendered surface as a `data:image/png` URL.
    fn read_png_data_url(&self) -> Result<String, ExportError>;
}
