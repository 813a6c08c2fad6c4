use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, Performance, Window};

use crate::config::PlaygroundConfig;
use crate::render_loop::{Clock, RenderLoop};
use crate::Playground;

use super::gl::WebGlBackend;
use super::{input, panel};

/// `performance.now()` relative to when the clock was created.
struct PerformanceClock {
    performance: Performance,
    start_ms: f64,
}

impl PerformanceClock {
    fn new(performance: Performance) -> Self {
        let start_ms = performance.now();
        Self { performance, start_ms }
    }
}

impl Clock for PerformanceClock {
    fn elapsed_seconds(&self) -> f64 {
        (self.performance.now() - self.start_ms) / 1000.0
    }
}

/// Build the scene, the panel and input handlers, then start the frame loop.
pub fn start(canvas: HtmlCanvasElement, config: PlaygroundConfig) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let performance = window.performance().ok_or("performance API unavailable")?;

    let backend = WebGlBackend::new(canvas.clone(), &config.geometry())?;
    let playground = Rc::new(RefCell::new(Playground::new(config, backend)));
    resize(&window, &playground);

    panel::build(&window, &document, &playground)?;
    input::attach(&canvas, &playground)?;

    // Resize canvas to fit window
    let resize_closure = {
        let playground = playground.clone();
        Closure::wrap(Box::new(move || {
            if let Some(window) = web_sys::window() {
                resize(&window, &playground);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut frames = RenderLoop::new(PerformanceClock::new(performance));
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut pg = playground.borrow_mut();
        frames.tick(&mut *pg);
        drop(pg);

        // schedule next
        if let Err(err) = request_frame(&f) {
            log::error!("render loop stopped: {err:?}");
        }
    }) as Box<dyn FnMut()>));

    request_frame(&g)?;
    Ok(())
}

fn request_frame(slot: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Result<i32, JsValue> {
    let window = window().ok_or("no window")?;
    let borrowed = slot.borrow();
    let closure = borrowed.as_ref().ok_or("frame callback missing")?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())
}

fn resize(window: &Window, playground: &panel::Shared) {
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let width = dimension(window.inner_width());
    let height = dimension(window.inner_height());
    let ratio = window.device_pixel_ratio();
    playground
        .borrow_mut()
        .resize(width as f32, height as f32, ratio as f32);
}
