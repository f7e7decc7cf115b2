//! Browser Helpers
//!
//! Thin wrappers over the DOM calls the commands need: file download and
//! upload, confirmation dialogs and the theme attribute.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use taskirra_core::Theme;

/// Offer `text` as a JSON file download
pub fn download_json(file_name: &str, text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();

    web_sys::Url::revoke_object_url(&url)
}

/// Text of the first file picked in a file input
pub async fn read_selected_file(input: &web_sys::HtmlInputElement) -> Result<Option<String>, JsValue> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };
    let text = JsFuture::from(file.text()).await?;
    Ok(text.as_string())
}

/// Native confirm dialog; a missing window counts as "no"
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn apply_theme(theme: Theme) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let name = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-bs-theme", name);
    }
    if let Some(body) = document.body() {
        let classes = body.class_list();
        let _ = match theme {
            Theme::Dark => classes.add_1("dark-mode"),
            Theme::Light => classes.remove_1("dark-mode"),
        };
    }
}
