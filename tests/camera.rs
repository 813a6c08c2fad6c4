use glam::Vec3;
use gradient_wasm::camera::{CameraMode, CameraRig, CameraSettings};

fn rig() -> CameraRig {
    CameraRig::new(Vec3::new(0.075, 0.175, 0.075), CameraSettings::default())
}

fn settle(rig: &mut CameraRig) {
    for _ in 0..400 {
        rig.update();
    }
}

#[test]
fn starts_locked_at_home() {
    let rig = rig();
    assert_eq!(rig.mode(), CameraMode::Locked);
    assert_eq!(rig.position(), rig.home());
    assert_eq!(rig.target(), Vec3::ZERO);
}

#[test]
fn toggle_returns_new_mode() {
    let mut rig = rig();
    assert_eq!(rig.toggle(), CameraMode::Editable);
    assert!(rig.is_editable());
    assert_eq!(rig.toggle(), CameraMode::Locked);
    assert!(!rig.is_editable());
}

#[test]
fn lock_snaps_back_to_home_and_origin() {
    let mut rig = rig();
    rig.set_editable(true);
    assert!(rig.set_position(Vec3::new(1.0, 1.0, 1.0)));
    rig.pan(40.0, -25.0, 600.0);
    settle(&mut rig);
    assert_ne!(rig.target(), Vec3::ZERO);

    rig.lock();
    assert_eq!(rig.mode(), CameraMode::Locked);
    assert_eq!(rig.position(), Vec3::new(0.075, 0.175, 0.075));
    assert_eq!(rig.target(), Vec3::ZERO);
}

#[test]
fn locked_camera_ignores_input() {
    let mut rig = rig();
    assert!(!rig.set_position(Vec3::new(2.0, 0.0, 0.0)));
    rig.rotate(100.0, 50.0, 500.0);
    rig.zoom(-1.0);
    rig.pan(10.0, 10.0, 500.0);
    assert!(!rig.update());
    assert_eq!(rig.position(), rig.home());
    assert_eq!(rig.target(), Vec3::ZERO);
}

#[test]
fn pending_input_is_dropped_on_lock() {
    let mut rig = rig();
    rig.set_editable(true);
    rig.rotate(300.0, 0.0, 500.0);
    rig.lock();
    rig.set_editable(true);
    rig.update();
    assert!(rig.position().distance(rig.home()) < 1e-5);
}

#[test]
fn zoom_is_clamped_to_distance_limits() {
    let mut rig = rig();
    rig.set_editable(true);
    for _ in 0..200 {
        rig.zoom(-1.0);
        rig.update();
    }
    let near = (rig.position() - rig.target()).length();
    assert!((near - 0.175).abs() < 1e-4, "{near}");

    for _ in 0..400 {
        rig.zoom(1.0);
        rig.update();
    }
    let far = (rig.position() - rig.target()).length();
    assert!((far - 3.0).abs() < 1e-3, "{far}");
}

#[test]
fn rotation_is_damped_over_frames() {
    let mut rig = rig();
    rig.set_editable(true);
    let radius = rig.position().length();
    rig.rotate(100.0, 0.0, 500.0);

    let start = rig.position();
    assert!(rig.update());
    let first_step = rig.position().distance(start);
    let mid = rig.position();
    rig.update();
    let second_step = rig.position().distance(mid);

    assert!(second_step < first_step);
    assert!((rig.position().length() - radius).abs() < 1e-4);
}

#[test]
fn set_home_moves_a_locked_camera_only() {
    let mut rig = rig();
    rig.set_home(Vec3::new(0.0, 1.0, 1.0));
    assert_eq!(rig.position(), Vec3::new(0.0, 1.0, 1.0));

    rig.set_editable(true);
    rig.set_position(Vec3::new(1.0, 0.5, 0.0));
    rig.set_home(Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(rig.position(), Vec3::new(1.0, 0.5, 0.0));
    rig.lock();
    assert_eq!(rig.position(), Vec3::new(0.0, 2.0, 0.0));
}

#[test]
fn aspect_rejects_degenerate_values() {
    let mut rig = rig();
    rig.set_aspect(16.0 / 9.0);
    rig.set_aspect(0.0);
    rig.set_aspect(f32::NAN);
    assert!((rig.aspect() - 16.0 / 9.0).abs() < 1e-6);
    assert!(rig.projection_matrix().is_finite());
}

#[test]
fn view_looks_at_target() {
    let rig = rig();
    let eye_space = rig.view_matrix().transform_point3(Vec3::ZERO);
    assert!(eye_space.x.abs() < 1e-5 && eye_space.y.abs() < 1e-5);
    assert!(eye_space.z < 0.0);
}
