//! DOM control panel. Builds plain `<input>` widgets for the panel layout and
//! routes their events into the shared playground.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement, Window};

use crate::app::ActionOutcome;
use crate::camera::CameraMode;
use crate::color::Rgb;
use crate::controls::{camera_button_title, Action, Folder, Widget, WidgetKind, WidgetSpec};
use crate::params::{Param, Value};
use crate::Playground;

use super::download;
use super::gl::WebGlBackend;

pub type Shared = Rc<RefCell<Playground<WebGlBackend>>>;

enum DomWidget {
    Color(HtmlInputElement),
    Toggle(HtmlInputElement),
    Slider { input: HtmlInputElement, readout: Element },
    Point2 { x: HtmlInputElement, y: HtmlInputElement, readout: Element },
}

impl Widget for DomWidget {
    fn refresh(&mut self, value: &Value) {
        match (self, *value) {
            (DomWidget::Color(input), Value::Color(c)) => input.set_value(&c.to_hex()),
            (DomWidget::Toggle(input), Value::Bool(b)) => input.set_checked(b),
            (DomWidget::Slider { input, readout }, Value::Scalar(v)) => {
                input.set_value(&v.to_string());
                readout.set_text_content(Some(&format!("{v:.2}")));
            }
            (DomWidget::Point2 { x, y, readout }, Value::Vec2([vx, vy])) => {
                x.set_value(&vx.to_string());
                y.set_value(&vy.to_string());
                readout.set_text_content(Some(&format!("{vx:.2}, {vy:.2}")));
            }
            (_, other) => log::warn!("widget cannot display {other:?}"),
        }
    }
}

/// Builds the panel into `document.body` and wires every widget and button.
pub fn build(window: &Window, document: &Document, playground: &Shared) -> Result<(), JsValue> {
    let body = document.body().ok_or("no body")?;
    let root = document.create_element("div")?;
    root.set_class_name("pane");

    let layout = playground.borrow().panel().clone();
    let title = document.create_element("div")?;
    title.set_class_name("pane-title");
    title.set_text_content(Some(layout.title()));
    root.append_child(&title)?;

    for folder in Folder::ALL {
        let details = document.create_element("details")?;
        details.set_attribute("open", "")?;
        let summary = document.create_element("summary")?;
        summary.set_text_content(Some(folder.title()));
        details.append_child(&summary)?;

        for binding in layout.bindings_in(folder) {
            let (row, widget) = build_widget(document, playground, binding.param, &binding.spec)?;
            details.append_child(&row)?;
            playground.borrow_mut().bind_widget(binding.param, widget);
        }
        root.append_child(&details)?;
    }

    for button in layout.actions() {
        if button.action == Action::Reset {
            root.append_child(&document.create_element("hr")?)?;
        }
        let el = document
            .create_element("button")?
            .dyn_into::<HtmlButtonElement>()?;
        el.set_text_content(Some(&button.label));
        if button.action == Action::ToggleCamera {
            let label = el.clone();
            playground.borrow_mut().subscribe(move |param, value| {
                if param == Param::EditCamera {
                    let mode = if value.as_bool().unwrap_or(false) {
                        CameraMode::Editable
                    } else {
                        CameraMode::Locked
                    };
                    label.set_text_content(Some(camera_button_title(mode)));
                }
            });
        }
        on_click(&el, window, document, playground, button.action)?;
        root.append_child(&el)?;
    }

    body.append_child(&root)?;
    playground.borrow_mut().refresh_widgets();
    Ok(())
}

fn build_widget(
    document: &Document,
    playground: &Shared,
    param: Param,
    spec: &WidgetSpec,
) -> Result<(Element, DomWidget), JsValue> {
    let row = document.create_element("label")?;
    row.set_class_name("pane-row");
    let caption = document.create_element("span")?;
    caption.set_text_content(Some(&spec.label));
    row.append_child(&caption)?;

    let widget = match spec.kind {
        WidgetKind::Color => {
            let input = make_input(document, "color")?;
            row.append_child(&input)?;
            listen(&input, "input", playground, param, read_color, vec![input.clone()])?;
            DomWidget::Color(input)
        }
        WidgetKind::Toggle => {
            let input = make_input(document, "checkbox")?;
            row.append_child(&input)?;
            listen(&input, "change", playground, param, read_toggle, vec![input.clone()])?;
            DomWidget::Toggle(input)
        }
        WidgetKind::Slider { min, max, step } => {
            let input = make_range(document, min, max, step)?;
            let readout = document.create_element("output")?;
            row.append_child(&input)?;
            row.append_child(&readout)?;
            listen(&input, "input", playground, param, read_scalar, vec![input.clone()])?;
            DomWidget::Slider { input, readout }
        }
        WidgetKind::Point2 { min, max, step } => {
            let x = make_range(document, min, max, step)?;
            let y = make_range(document, min, max, step)?;
            let readout = document.create_element("output")?;
            row.append_child(&x)?;
            row.append_child(&y)?;
            row.append_child(&readout)?;
            for axis in [&x, &y] {
                listen(axis, "input", playground, param, read_vec2, vec![x.clone(), y.clone()])?;
            }
            DomWidget::Point2 { x, y, readout }
        }
    };
    Ok((row, widget))
}

fn read_color(inputs: &[HtmlInputElement]) -> Option<Value> {
    Rgb::from_hex(&inputs.first()?.value()).ok().map(Value::Color)
}

fn read_toggle(inputs: &[HtmlInputElement]) -> Option<Value> {
    Some(Value::Bool(inputs.first()?.checked()))
}

fn read_scalar(inputs: &[HtmlInputElement]) -> Option<Value> {
    inputs.first()?.value().parse().ok().map(Value::Scalar)
}

fn read_vec2(inputs: &[HtmlInputElement]) -> Option<Value> {
    let [x, y] = inputs else {
        return None;
    };
    Some(Value::Vec2([x.value().parse().ok()?, y.value().parse().ok()?]))
}

fn make_input(document: &Document, kind: &str) -> Result<HtmlInputElement, JsValue> {
    let input = document
        .create_element("input")?
        .dyn_into::<HtmlInputElement>()?;
    input.set_type(kind);
    Ok(input)
}

fn make_range(
    document: &Document,
    min: f32,
    max: f32,
    step: f32,
) -> Result<HtmlInputElement, JsValue> {
    let input = make_input(document, "range")?;
    input.set_min(&min.to_string());
    input.set_max(&max.to_string());
    input.set_step(&step.to_string());
    Ok(input)
}

/// Forwards `event` on `target` as a change of `param`, with the value read
/// from `inputs` by `read`.
fn listen(
    target: &HtmlInputElement,
    event: &str,
    playground: &Shared,
    param: Param,
    read: fn(&[HtmlInputElement]) -> Option<Value>,
    inputs: Vec<HtmlInputElement>,
) -> Result<(), JsValue> {
    let playground = playground.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(value) = read(&inputs) else {
            log::warn!("unreadable input for {param}");
            return;
        };
        if let Err(err) = playground.borrow_mut().handle_change(param, value) {
            log::error!("{param}: {err}");
        }
    }) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn on_click(
    button: &HtmlButtonElement,
    window: &Window,
    document: &Document,
    playground: &Shared,
    action: Action,
) -> Result<(), JsValue> {
    let playground = playground.clone();
    let window = window.clone();
    let document = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let now = js_sys::Date::now() as u64;
        // Borrow ends before the download touches the DOM.
        let outcome = playground.borrow_mut().trigger(action, now);
        let result = match outcome {
            Ok(ActionOutcome::Exported(frame)) => download::save(&document, &frame),
            Ok(other) => {
                log::debug!("{action:?} -> {other:?}");
                Ok(())
            }
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log::error!("Error exporting image: {err}");
            let _ = window.alert_with_message("Failed to export image. Please try again.");
        }
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
