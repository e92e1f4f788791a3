use screening_core::download::{FileSaver, SaveError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Saves through a transient object URL and a synthetic anchor click.
pub struct BrowserSaver;

fn platform(e: JsValue) -> SaveError {
    SaveError::Platform(format!("{e:?}"))
}

impl FileSaver for BrowserSaver {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), SaveError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(platform)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(platform)?;
        let clicked = click_anchor(&url, file_name);
        Url::revoke_object_url(&url).map_err(platform)?;
        clicked
    }
}

fn click_anchor(url: &str, file_name: &str) -> Result<(), SaveError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SaveError::Platform("document not available".into()))?;
    let body = document
        .body()
        .ok_or_else(|| SaveError::Platform("document has no body".into()))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(platform)?
        .dyn_into()
        .map_err(|_| SaveError::Platform("created element is not an anchor".into()))?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(platform)?;
    anchor.click();
    body.remove_child(&anchor).map_err(platform)?;
    Ok(())
}
