use wasm_bindgen::JsValue;
use web_sys::UrlSearchParams;

use crate::config::PlaygroundConfig;

/// Decoded values of the known override keys present in `search`.
pub fn overrides(search: &str) -> Result<Vec<(&'static str, String)>, JsValue> {
    let params = UrlSearchParams::new_with_str(search)?;
    Ok(PlaygroundConfig::QUERY_KEYS
        .iter()
        .filter_map(|&key| params.get(key).map(|value| (key, value)))
        .collect())
}
