//! The playground: parameter store, shader binding, camera rig and panel
//! layout wired together. Every user action lands on one method here.

use glam::Vec3;

use crate::backend::{RenderBackend, Viewport};
use crate::camera::{CameraMode, CameraRig};
use crate::color::{Hsl, Rgb};
use crate::config::PlaygroundConfig;
use crate::controls::{Action, ControlPanel, Widget};
use crate::export::{ExportError, ExportedFrame};
use crate::params::{Param, ParamError, ParamStore, SubscriptionId, Value};
use crate::shader::ShaderBinding;

/// What a button press did, for the host to follow up on.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Camera(CameraMode),
    ColorsRandomized(Vec<Hsl>),
    Exported(ExportedFrame),
    Reset,
}

#[derive(Debug)]
pub struct Playground<B> {
    config: PlaygroundConfig,
    store: ParamStore,
    shader: ShaderBinding<B>,
    camera: CameraRig,
    panel: ControlPanel,
    viewport: Viewport,
    rng: fastrand::Rng,
}

impl<B: RenderBackend> Playground<B> {
    pub fn new(config: PlaygroundConfig, backend: B) -> Self {
        Self::with_rng(config, backend, fastrand::Rng::new())
    }

    pub fn with_rng(config: PlaygroundConfig, backend: B, rng: fastrand::Rng) -> Self {
        let geometry = config.geometry();
        let home = Vec3::from_array(config.initial.camera_position);
        let mut playground = Self {
            store: ParamStore::new(config.initial),
            shader: ShaderBinding::new(backend, geometry, config.color_count),
            camera: CameraRig::new(home, config.camera),
            panel: ControlPanel::standard(config.color_count),
            viewport: Viewport::new(1.0, 1.0, 1.0, config.max_pixel_ratio),
            config,
            rng,
        };
        for (param, value) in playground.store.current().entries() {
            playground.dispatch(param, value);
        }
        playground
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn shader(&self) -> &ShaderBinding<B> {
        &self.shader
    }

    pub fn backend(&self) -> &B {
        self.shader.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.shader.backend_mut()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Direct access for pointer input. Mode changes should go through
    /// [`Playground::toggle_camera_edit`] so the store stays in step.
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn get(&self, param: Param) -> Value {
        self.store.get(param)
    }

    /// Attaches a widget to `param` using the panel's layout entry.
    pub fn bind_widget(&mut self, param: Param, widget: impl Widget + 'static) {
        let Some(spec) = self.panel.spec_for(param).cloned() else {
            log::warn!("no panel entry for {param}, widget not bound");
            return;
        };
        self.panel.bind(&mut self.store, param, spec, widget);
    }

    /// Pushes the current value of every bound parameter to its widget.
    pub fn refresh_widgets(&mut self) {
        self.panel.refresh_all(&mut self.store);
    }

    /// Subscribes an arbitrary observer to store changes.
    pub fn subscribe(&mut self, observer: impl FnMut(Param, &Value) + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    /// Widget change path: clamp to the parameter's domain, write the store
    /// (which refreshes subscribed widgets), then push to the uniform.
    pub fn handle_change(&mut self, param: Param, value: Value) -> Result<(), ParamError> {
        let value = param.domain().clamp(value);
        self.store.set(param, value)?;
        self.dispatch(param, value);
        Ok(())
    }

    /// Parameter-to-effect table. Every store write ends up here.
    fn dispatch(&mut self, param: Param, value: Value) {
        match (param, value) {
            (Param::EditCamera, Value::Bool(editable)) => self.camera.set_editable(editable),
            (Param::CameraPosition, Value::Vec3(home)) => {
                self.camera.set_home(Vec3::from_array(home))
            }
            _ => {
                if let Err(err) = self.shader.apply(param, value) {
                    log::warn!("dropping {param} update: {err}");
                }
            }
        }
    }

    pub fn trigger(
        &mut self,
        action: Action,
        timestamp_ms: u64,
    ) -> Result<ActionOutcome, ExportError> {
        let outcome = match action {
            Action::ToggleCamera => ActionOutcome::Camera(self.toggle_camera_edit()),
            Action::RandomizeColors => ActionOutcome::ColorsRandomized(self.randomize_colors()),
            Action::ExportImage => {
                ActionOutcome::Exported(self.export_current_frame(timestamp_ms)?)
            }
            Action::Reset => {
                self.reset();
                ActionOutcome::Reset
            }
        };
        Ok(outcome)
    }

    pub fn toggle_camera_edit(&mut self) -> CameraMode {
        let editable = !self.camera.is_editable();
        if let Err(err) = self.handle_change(Param::EditCamera, Value::Bool(editable)) {
            log::error!("camera toggle failed: {err}");
        }
        self.camera.mode()
    }

    /// Draws a fresh HSL color for every active color parameter.
    pub fn randomize_colors(&mut self) -> Vec<Hsl> {
        let count = self.config.color_count;
        let mut drawn = Vec::with_capacity(count);
        for &param in Param::COLORS.iter().take(count) {
            let hsl = Hsl::random(&mut self.rng);
            let rgb: Rgb = hsl.to_rgb();
            if let Err(err) = self.handle_change(param, Value::Color(rgb)) {
                log::error!("randomize {param}: {err}");
            }
            drawn.push(hsl);
        }
        self.panel.refresh_matching(&mut self.store, Param::is_color);
        log::debug!("randomized {count} colors");
        drawn
    }

    /// Restores every parameter, uniform and the camera to the startup state.
    pub fn reset(&mut self) {
        for (param, value) in self.store.reset() {
            self.dispatch(param, value);
        }
        self.camera.lock();
        log::info!("playground reset");
    }

    /// One render-loop step at `elapsed` seconds.
    pub fn frame(&mut self, elapsed: f32) {
        self.shader.advance_time(elapsed);
        self.camera.update();
        self.shader.draw(&self.camera);
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        let max_ratio = self.config.max_pixel_ratio;
        self.viewport = Viewport::new(width, height, device_pixel_ratio, max_ratio);
        self.camera.set_aspect(self.viewport.aspect());
        self.shader.resize(&self.viewport);
    }

    /// Renders once and serializes the surface. On error nothing changes.
    pub fn export_current_frame(
        &mut self,
        timestamp_ms: u64,
    ) -> Result<ExportedFrame, ExportError> {
        self.shader.draw(&self.camera);
        let data_url = self.shader.read_png_data_url()?;
        let frame = ExportedFrame::new(data_url, timestamp_ms)?;
        log::info!("exported {}", frame.file_name);
        Ok(frame)
    }
}
