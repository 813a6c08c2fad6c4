use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

use crate::export::{ExportError, ExportedFrame};

/// Saves `frame` through a temporary `<a download>` link.
pub fn save(document: &Document, frame: &ExportedFrame) -> Result<(), ExportError> {
    let failed = |err: wasm_bindgen::JsValue| ExportError::Download(format!("{err:?}"));
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("no document body".to_string()))?;
    let link = document
        .create_element("a")
        .map_err(failed)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|el| failed(el.into()))?;
    link.set_href(&frame.data_url);
    link.set_download(&frame.file_name);

    body.append_child(&link).map_err(failed)?;
    link.click();
    body.remove_child(&link).map_err(failed)?;
    Ok(())
}
