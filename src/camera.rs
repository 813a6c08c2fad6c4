//! Camera rig: a perspective viewpoint with an orbit mode that can be
//! switched on and off.
//!
//! While locked the camera sits at its home pose looking at the origin. While
//! editable, pointer input accumulates rotate/zoom/pan deltas that
//! [`CameraRig::update`] applies with exponential damping, one step per frame.
//! Locking always snaps back to the home pose.

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Locked,
    Editable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            min_distance: 0.175,
            max_distance: 3.0,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

const MIN_POLAR: f32 = 1e-6;

/// Pending input not yet folded into the pose.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrbitDelta {
    theta: f32,
    phi: f32,
    scale: f32,
    pan: Vec3,
}

impl Default for OrbitDelta {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            scale: 1.0,
            pan: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    mode: CameraMode,
    home: Vec3,
    position: Vec3,
    target: Vec3,
    aspect: f32,
    settings: CameraSettings,
    delta: OrbitDelta,
}

impl CameraRig {
    pub fn new(home: Vec3, settings: CameraSettings) -> Self {
        Self {
            mode: CameraMode::Locked,
            home,
            position: home,
            target: Vec3::ZERO,
            aspect: 1.0,
            settings,
            delta: OrbitDelta::default(),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_editable(&self) -> bool {
        self.mode == CameraMode::Editable
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Flips between locked and editable and returns the new mode.
    pub fn toggle(&mut self) -> CameraMode {
        self.set_editable(!self.is_editable());
        self.mode
    }

    pub fn set_editable(&mut self, editable: bool) {
        if editable {
            self.mode = CameraMode::Editable;
        } else {
            self.lock();
        }
    }

    /// Disables orbit control and snaps to the home pose.
    pub fn lock(&mut self) {
        self.mode = CameraMode::Locked;
        self.position = self.home;
        self.target = Vec3::ZERO;
        self.delta = OrbitDelta::default();
    }

    /// New home pose; applied immediately when locked.
    pub fn set_home(&mut self, home: Vec3) {
        self.home = home;
        if !self.is_editable() {
            self.position = home;
        }
    }

    /// Moves the camera directly. Ignored while locked.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.position = position;
        true
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Drag by `(dx, dy)` pixels on an element `element_height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, element_height: f32) {
        if !self.is_editable() || element_height <= 0.0 {
            return;
        }
        let per_pixel = std::f32::consts::TAU * self.settings.rotate_speed / element_height;
        self.delta.theta -= dx * per_pixel;
        self.delta.phi -= dy * per_pixel;
    }

    /// Wheel input; negative `delta_y` moves closer.
    pub fn zoom(&mut self, delta_y: f32) {
        if !self.is_editable() || delta_y == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.settings.zoom_speed);
        if delta_y < 0.0 {
            self.delta.scale *= step;
        } else {
            self.delta.scale /= step;
        }
    }

    pub fn pan(&mut self, dx: f32, dy: f32, element_height: f32) {
        if !self.is_editable() || element_height <= 0.0 {
            return;
        }
        let offset = self.position - self.target;
        let half_fov = self.settings.fov_degrees.to_radians() * 0.5;
        let target_distance = offset.length() * half_fov.tan();
        let (right, up) = self.basis();
        self.delta.pan += right * (-2.0 * dx * target_distance / element_height);
        self.delta.pan += up * (2.0 * dy * target_distance / element_height);
    }

    /// One damping step. Returns whether the pose changed.
    pub fn update(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        let before = (self.position, self.target);
        let damping = self.settings.damping_factor;

        let offset = self.position - self.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            radius = self.settings.min_distance;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta.theta * damping;
        phi = (phi + self.delta.phi * damping).clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        radius = (radius * self.delta.scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);
        self.target += self.delta.pan * damping;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        self.position = self.target + offset;

        self.delta.theta *= 1.0 - damping;
        self.delta.phi *= 1.0 - damping;
        self.delta.pan *= 1.0 - damping;
        self.delta.scale = 1.0;

        (self.position, self.target) != before
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.settings.fov_degrees.to_radians(),
            self.aspect,
            self.settings.near,
            self.settings.far,
        )
    }

    fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }
}
