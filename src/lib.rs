//! Shader-gradient playground: a subdivided plane shaded by a noisy color
//! gradient, with a live control panel and still-frame export.
//!
//! Everything outside `wasm` is host-agnostic and runs under `cargo test`.

pub mod app;
pub mod backend;
pub mod camera;
pub mod color;
pub mod config;
pub mod controls;
pub mod export;
pub mod params;
pub mod render_loop;
pub mod shader;
pub mod uniforms;

pub use app::{ActionOutcome, Playground};
pub use config::PlaygroundConfig;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::PlaygroundConfig;

    mod download;
    mod gl;
    mod input;
    mod panel;
    mod query;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let mut config = PlaygroundConfig::default();
        let search = window.location().search().unwrap_or_default();
        if let Err(err) = config.apply_overrides(query::overrides(&search)?) {
            log::warn!("ignoring query overrides: {err}");
        }

        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        log::info!("gradient playground starting ({} colors)", config.color_count);
        render::start(canvas, config)?;
        Ok(())
    }
}
