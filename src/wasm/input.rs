//! Pointer input for the camera's orbit mode. Left drag rotates, right drag
//! pans, the wheel zooms. The rig ignores all of it while locked.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlCanvasElement, PointerEvent, WheelEvent};

use super::panel::Shared;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Rotate { x: f32, y: f32 },
    Pan { x: f32, y: f32 },
}

pub fn attach(canvas: &HtmlCanvasElement, playground: &Shared) -> Result<(), JsValue> {
    let drag: Rc<Cell<Option<Drag>>> = Rc::new(Cell::new(None));

    {
        let drag = drag.clone();
        let playground = playground.clone();
        let target = canvas.clone();
        add_listener(canvas, "pointerdown", move |event: PointerEvent| {
            if !playground.borrow().camera().is_editable() {
                return;
            }
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            let state = match event.button() {
                0 => Drag::Rotate { x, y },
                2 => Drag::Pan { x, y },
                _ => return,
            };
            let _ = target.set_pointer_capture(event.pointer_id());
            drag.set(Some(state));
        })?;
    }

    {
        let drag = drag.clone();
        let playground = playground.clone();
        let target = canvas.clone();
        add_listener(canvas, "pointermove", move |event: PointerEvent| {
            let Some(state) = drag.get() else {
                return;
            };
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            let height = target.client_height() as f32;
            let mut pg = playground.borrow_mut();
            let camera = pg.camera_mut();
            match state {
                Drag::Rotate { x: px, y: py } => {
                    camera.rotate(x - px, y - py, height);
                    drag.set(Some(Drag::Rotate { x, y }));
                }
                Drag::Pan { x: px, y: py } => {
                    camera.pan(x - px, y - py, height);
                    drag.set(Some(Drag::Pan { x, y }));
                }
            }
        })?;
    }

    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        add_listener(canvas, name, move |_: PointerEvent| drag.set(None))?;
    }

    {
        let playground = playground.clone();
        add_listener(canvas, "wheel", move |event: WheelEvent| {
            let mut pg = playground.borrow_mut();
            if pg.camera().is_editable() {
                event.prevent_default();
                pg.camera_mut().zoom(event.delta_y() as f32);
            }
        })?;
    }

    add_listener(canvas, "contextmenu", |event: Event| event.prevent_default())?;
    Ok(())
}

fn add_listener<E, F>(canvas: &HtmlCanvasElement, name: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    }) as Box<dyn FnMut(Event)>);
    canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
