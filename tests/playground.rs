mod common;

use common::{playground, small_config, RecordingBackend, SpyWidget};
use glam::Vec3;
use gradient_wasm::camera::CameraMode;
use gradient_wasm::color::Rgb;
use gradient_wasm::controls::{camera_button_title, Action, Folder};
use gradient_wasm::export::ExportError;
use gradient_wasm::params::{Param, ParamError, Value};
use gradient_wasm::uniforms::{Uniform, UniformValue};
use gradient_wasm::{ActionOutcome, Playground};

fn color(p: &Playground<RecordingBackend>, param: Param) -> Rgb {
    p.get(param).as_color().unwrap()
}

#[test]
fn startup_pushes_every_param_to_its_uniform() {
    let pg = playground();
    let u = pg.shader().uniforms();
    assert_eq!(u.color(0).unwrap().to_hex(), "#8ecae6");
    assert_eq!(u.color(1).unwrap().to_hex(), "#219ebc");
    assert_eq!(u.color(2).unwrap().to_hex(), "#023047");
    assert_eq!(u.amount, 0.1);
    assert_eq!(u.speed, 0.1);
    assert_eq!(u.frequency, [3.0, 6.0]);
    assert!(!u.wireframe);
    assert!(!u.enable_grain);
    assert_eq!(pg.camera().mode(), CameraMode::Locked);
}

#[test]
fn color_change_then_reset_restores_default() {
    let mut pg = playground();
    pg.handle_change(Param::Color1, Value::Color("#000000".parse().unwrap()))
        .unwrap();
    assert_eq!(pg.shader().uniforms().color(0).unwrap().to_hex(), "#000000");

    pg.reset();
    assert_eq!(color(&pg, Param::Color1).to_hex(), "#8ecae6");
    assert_eq!(pg.shader().uniforms().color(0).unwrap().to_hex(), "#8ecae6");
}

#[test]
fn wireframe_and_noise_reach_uniforms() {
    let mut pg = playground();
    pg.handle_change(Param::Wireframe, Value::Bool(true)).unwrap();
    pg.handle_change(Param::Grain, Value::Bool(true)).unwrap();
    pg.handle_change(Param::NoiseSpeed, Value::Scalar(0.3)).unwrap();
    pg.handle_change(Param::NoiseFrequency, Value::Vec2([1.0, 2.0])).unwrap();
    pg.frame(0.5);

    let drawn = &pg.backend().last().uniforms;
    assert!(drawn.wireframe);
    assert!(drawn.enable_grain);
    assert_eq!(drawn.speed, 0.3);
    assert_eq!(drawn.frequency, [1.0, 2.0]);
    assert_eq!(drawn.time, 0.5);
}

#[test]
fn out_of_range_writes_are_clamped() {
    let mut pg = playground();
    pg.handle_change(Param::NoiseAmount, Value::Scalar(5.0)).unwrap();
    assert_eq!(pg.get(Param::NoiseAmount), Value::Scalar(1.0));
    assert_eq!(
        pg.shader().uniforms().get(Uniform::Amount),
        Some(UniformValue::Float(1.0))
    );
}

#[test]
fn surplus_colors_are_store_only() {
    let mut pg = playground();
    let before = pg.shader().uniforms().clone();
    pg.handle_change(Param::Color4, Value::Color(Rgb::BLACK)).unwrap();
    pg.handle_change(Param::Color5, Value::Color(Rgb::BLACK)).unwrap();
    assert_eq!(pg.shader().uniforms(), &before);
    assert_eq!(color(&pg, Param::Color4), Rgb::BLACK);
}

#[test]
fn wrong_kind_is_an_error_and_changes_nothing() {
    let mut pg = playground();
    let err = pg.handle_change(Param::Wireframe, Value::Scalar(1.0)).unwrap_err();
    assert!(matches!(err, ParamError::KindMismatch { .. }));
    assert_eq!(pg.get(Param::Wireframe), Value::Bool(false));
    assert!(!pg.shader().uniforms().wireframe);
}

#[test]
fn randomize_changes_colors_and_refreshes_widgets() {
    let mut pg = playground();
    let spy = SpyWidget::default();
    pg.bind_widget(Param::Color1, spy.clone());
    assert_eq!(spy.last(), Some(Value::Color(Rgb::from_hex("#8ecae6").unwrap())));

    let before = pg.shader().uniforms().colors;
    let drawn = match pg.trigger(Action::RandomizeColors, 0).unwrap() {
        ActionOutcome::ColorsRandomized(drawn) => drawn,
        other => panic!("unexpected outcome {other:?}"),
    };
    assert_eq!(drawn.len(), 5);
    for hsl in &drawn {
        assert!((0.5..=1.0).contains(&hsl.s));
        assert!((0.4..=0.8).contains(&hsl.l));
    }
    assert_ne!(pg.shader().uniforms().colors, before);

    let new_first = drawn[0].to_rgb();
    assert_eq!(color(&pg, Param::Color1), new_first);
    assert_eq!(spy.last(), Some(Value::Color(new_first)));
    assert_eq!(pg.shader().uniforms().color(0), Some(new_first));
}

#[test]
fn randomize_respects_color_count() {
    let mut config = small_config();
    config.color_count = 3;
    let rng = fastrand::Rng::with_seed(1);
    let mut pg = Playground::with_rng(config, RecordingBackend::default(), rng);
    let drawn = pg.randomize_colors();
    assert_eq!(drawn.len(), 3);
    assert_eq!(color(&pg, Param::Color4).to_hex(), "#ffb703");
    assert_eq!(pg.panel().bindings_in(Folder::Color).count(), 3);
}

#[test]
fn reset_refreshes_bound_widgets() {
    let mut pg = playground();
    let spy = SpyWidget::default();
    pg.bind_widget(Param::NoiseAmount, spy.clone());
    pg.handle_change(Param::NoiseAmount, Value::Scalar(0.9)).unwrap();
    assert_eq!(spy.last(), Some(Value::Scalar(0.9)));

    pg.trigger(Action::Reset, 0).unwrap();
    assert_eq!(spy.last(), Some(Value::Scalar(0.1)));
}

#[test]
fn reset_twice_is_the_same_as_once() {
    let mut pg = playground();
    pg.randomize_colors();
    pg.handle_change(Param::Wireframe, Value::Bool(true)).unwrap();
    pg.reset();
    let once = (*pg.store().current(), pg.shader().uniforms().clone());
    pg.reset();
    assert_eq!(pg.store().current(), &once.0);
    assert_eq!(pg.shader().uniforms(), &once.1);
    assert_eq!(pg.store().current(), pg.store().initial());
}

#[test]
fn camera_toggle_goes_through_the_store() {
    let mut pg = playground();
    let titles: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>> = Default::default();
    let sink = titles.clone();
    pg.subscribe(move |param, value| {
        if let (Param::EditCamera, Value::Bool(on)) = (param, value) {
            let mode = if *on { CameraMode::Editable } else { CameraMode::Locked };
            sink.borrow_mut().push(camera_button_title(mode));
        }
    });

    let outcome = pg.trigger(Action::ToggleCamera, 0).unwrap();
    assert_eq!(outcome, ActionOutcome::Camera(CameraMode::Editable));
    assert_eq!(pg.get(Param::EditCamera), Value::Bool(true));

    assert!(pg.camera_mut().set_position(Vec3::new(1.0, 1.0, 1.0)));
    assert_eq!(pg.toggle_camera_edit(), CameraMode::Locked);
    assert_eq!(pg.camera().position(), Vec3::new(0.075, 0.175, 0.075));
    assert_eq!(pg.camera().target(), Vec3::ZERO);
    assert_eq!(*titles.borrow(), ["🎥 Reset Camera", "🎥 Edit Camera"]);
}

#[test]
fn reset_locks_an_orbiting_camera() {
    let mut pg = playground();
    pg.toggle_camera_edit();
    pg.camera_mut().rotate(120.0, 40.0, 600.0);
    for t in 0..30 {
        pg.frame(t as f32 / 60.0);
    }
    assert_ne!(pg.camera().position(), Vec3::new(0.075, 0.175, 0.075));

    pg.reset();
    assert_eq!(pg.camera().mode(), CameraMode::Locked);
    assert_eq!(pg.get(Param::EditCamera), Value::Bool(false));
    pg.frame(1.0);
    assert_eq!(pg.backend().last().camera_position, Vec3::new(0.075, 0.175, 0.075));
}

#[test]
fn export_names_file_after_timestamp() {
    let mut pg = playground();
    let frames_before = pg.backend().frames.len();
    let frame = match pg.trigger(Action::ExportImage, 1_700_000_000_000).unwrap() {
        ActionOutcome::Exported(frame) => frame,
        other => panic!("unexpected outcome {other:?}"),
    };
    assert_eq!(frame.file_name, "gradient-1700000000000.png");
    assert!(frame.data_url.starts_with("data:image/png"));
    assert_eq!(pg.backend().frames.len(), frames_before + 1);
}

#[test]
fn failed_export_leaves_state_untouched() {
    let mut pg = Playground::with_rng(
        small_config(),
        RecordingBackend::failing_export(),
        fastrand::Rng::with_seed(3),
    );
    pg.handle_change(Param::NoiseAmount, Value::Scalar(0.7)).unwrap();
    let params = *pg.store().current();
    let uniforms = pg.shader().uniforms().clone();

    let err = pg.trigger(Action::ExportImage, 5).unwrap_err();
    assert!(matches!(err, ExportError::Serialize(_)));
    assert_eq!(pg.store().current(), &params);
    assert_eq!(pg.shader().uniforms(), &uniforms);
}

#[test]
fn export_rejects_blank_surface() {
    let backend = RecordingBackend {
        export: Some(Ok("data:,".to_string())),
        ..RecordingBackend::default()
    };
    let mut pg = Playground::with_rng(small_config(), backend, fastrand::Rng::with_seed(3));
    assert_eq!(pg.export_current_frame(1), Err(ExportError::EmptySurface));
}

#[test]
fn resize_clamps_pixel_ratio_and_updates_aspect() {
    let mut pg = playground();
    pg.resize(800.0, 400.0, 3.0);
    assert_eq!(pg.viewport().pixel_ratio, 2.0);
    assert_eq!(pg.viewport().buffer_size(), (1600, 800));
    assert_eq!(pg.camera().aspect(), 2.0);
    assert_eq!(pg.backend().viewports.last(), Some(pg.viewport()));

    pg.resize(800.0, 400.0, 1.5);
    assert_eq!(pg.viewport().pixel_ratio, 1.5);
}

#[test]
fn panel_layout_matches_stock_gui() {
    let pg = playground();
    let panel = pg.panel();
    assert_eq!(panel.title(), "Gradient Generator");
    let labels: Vec<&str> = panel.actions().iter().map(|a| a.label.as_str()).collect();
    assert_eq!(
        labels,
        ["🎥 Edit Camera", "🎨 Randomize Colors", "🖼️ Export Image", "🔄 Reset"]
    );
    assert_eq!(panel.bindings_in(Folder::Mesh).count(), 2);
    assert_eq!(panel.bindings_in(Folder::Color).count(), 5);
    assert_eq!(panel.bindings_in(Folder::Noise).count(), 3);
    assert!(panel.spec_for(Param::CameraPosition).is_none());
}

#[test]
fn unbound_param_widget_is_ignored() {
    let mut pg = playground();
    let spy = SpyWidget::default();
    pg.bind_widget(Param::CameraPosition, spy.clone());
    assert_eq!(spy.count(), 0);
}

#[test]
fn refresh_reaches_only_bound_widgets() {
    let mut pg = playground();
    let speed = SpyWidget::default();
    let grain = SpyWidget::default();
    pg.bind_widget(Param::NoiseSpeed, speed.clone());
    pg.bind_widget(Param::Grain, grain.clone());
    pg.refresh_widgets();
    assert_eq!(speed.count(), 2);
    assert_eq!(grain.count(), 2);
    assert_eq!(speed.last(), Some(Value::Scalar(0.1)));
}

#[test]
fn two_colors_fill_every_shader_slot() {
    let mut config = small_config();
    config.color_count = 2;
    let rng = fastrand::Rng::with_seed(9);
    let mut pg = Playground::with_rng(config, RecordingBackend::default(), rng);
    assert_eq!(pg.shader().active_colors(), 2);
    assert_eq!(pg.shader().uniforms().color(2).unwrap().to_hex(), "#219ebc");

    let drawn = pg.randomize_colors();
    pg.frame(0.0);
    let second = drawn[1].to_rgb();
    let uniforms = &pg.backend().last().uniforms;
    assert_eq!(uniforms.color(0), Some(drawn[0].to_rgb()));
    assert_eq!(uniforms.color(1), Some(second));
    assert_eq!(uniforms.color(2), Some(second));

    pg.handle_change(Param::Color3, Value::Color(Rgb::BLACK)).unwrap();
    assert_eq!(pg.shader().uniforms().color(2), Some(second));

    pg.reset();
    assert_eq!(pg.shader().uniforms().color(2).unwrap().to_hex(), "#219ebc");
}

#[test]
fn rebinding_detaches_the_previous_widget() {
    let mut pg = playground();
    let old = SpyWidget::default();
    let new = SpyWidget::default();
    pg.bind_widget(Param::NoiseAmount, old.clone());
    let observers = pg.store().observer_count();

    pg.bind_widget(Param::NoiseAmount, new.clone());
    assert_eq!(pg.store().observer_count(), observers);
    assert!(pg.panel().has_widget(Param::NoiseAmount));

    pg.handle_change(Param::NoiseAmount, Value::Scalar(0.5)).unwrap();
    assert_eq!(old.count(), 1);
    assert_eq!(new.count(), 2);
    assert_eq!(new.last(), Some(Value::Scalar(0.5)));
}
