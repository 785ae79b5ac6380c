//! Bindings to the PDF generation collaborator and the shared font
//! loader, both exposed on `window.pdfDesigner` next to the widget.

use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Url};

use common::session::GenerateRequest;

use crate::widget::js_error_text;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "pdfDesigner"], js_name = generate, catch)]
    fn generate_raw(props: JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "pdfDesigner"], js_name = loadFont, catch)]
    fn load_font_raw() -> Result<Promise, JsValue>;
}

/// Resolves the font resource shared by the widget and the generator.
pub async fn load_font() -> Result<JsValue, String> {
    let promise = load_font_raw().map_err(js_error_text)?;
    JsFuture::from(promise).await.map_err(js_error_text)
}

/// Runs the generation collaborator on the given template and inputs and
/// returns the produced PDF bytes.
pub async fn generate_pdf(request: &GenerateRequest, font: &JsValue) -> Result<Vec<u8>, String> {
    let json = serde_json::to_string(request).map_err(|e| e.to_string())?;
    let props = js_sys::JSON::parse(&json).map_err(js_error_text)?;
    if !font.is_undefined() && !font.is_null() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("font"), font).map_err(js_error_text)?;
        js_sys::Reflect::set(&props, &JsValue::from_str("options"), &options)
            .map_err(js_error_text)?;
    }
    let promise = generate_raw(props).map_err(js_error_text)?;
    let value = JsFuture::from(promise).await.map_err(js_error_text)?;
    Ok(Uint8Array::new(&value).to_vec())
}

/// Opens the generated document in a new browser tab.
pub fn open_pdf(bytes: &[u8]) -> Result<(), String> {
    let parts = Array::of1(&Uint8Array::from(bytes).into());
    let props = BlobPropertyBag::new();
    props.set_type("application/pdf");
    let blob =
        Blob::new_with_u8_array_sequence_and_options(&parts, &props).map_err(js_error_text)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error_text)?;
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    window.open_with_url(&url).map_err(js_error_text)?;
    Ok(())
}
