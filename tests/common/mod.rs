#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use gradient_wasm::backend::{Frame, RenderBackend, Viewport};
use gradient_wasm::controls::Widget;
use gradient_wasm::export::ExportError;
use gradient_wasm::params::Value;
use gradient_wasm::uniforms::UniformSet;
use gradient_wasm::{Playground, PlaygroundConfig};

#[derive(Debug, Clone)]
pub struct DrawnFrame {
    pub uniforms: UniformSet,
    pub camera_position: Vec3,
}

/// Backend that remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub frames: Vec<DrawnFrame>,
    pub viewports: Vec<Viewport>,
    pub export: Option<Result<String, ExportError>>,
}

impl RecordingBackend {
    pub fn failing_export() -> Self {
        Self {
            export: Some(Err(ExportError::Serialize("SecurityError: tainted canvas".into()))),
            ..Self::default()
        }
    }

    pub fn last(&self) -> &DrawnFrame {
        self.frames.last().expect("nothing drawn yet")
    }
}

impl RenderBackend for RecordingBackend {
    fn resize(&mut self, viewport: &Viewport) {
        self.viewports.push(*viewport);
    }

    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.push(DrawnFrame {
            uniforms: frame.uniforms.clone(),
            camera_position: frame.camera_position,
        });
    }

    fn read_png_data_url(&self) -> Result<String, ExportError> {
        self.export
            .clone()
            .unwrap_or_else(|| Ok("data:image/png;base64,iVBORw0KGgo=".to_string()))
    }
}

/// Widget that logs every value it is asked to display.
#[derive(Debug, Clone, Default)]
pub struct SpyWidget {
    pub seen: Rc<RefCell<Vec<Value>>>,
}

impl SpyWidget {
    pub fn last(&self) -> Option<Value> {
        self.seen.borrow().last().copied()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Widget for SpyWidget {
    fn refresh(&mut self, value: &Value) {
        self.seen.borrow_mut().push(*value);
    }
}

pub fn small_config() -> PlaygroundConfig {
    PlaygroundConfig {
        plane_segments: 4,
        ..PlaygroundConfig::default()
    }
}

pub fn playground() -> Playground<RecordingBackend> {
    Playground::with_rng(small_config(), RecordingBackend::default(), fastrand::Rng::with_seed(7))
}
