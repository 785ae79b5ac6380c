//! Bindings to the canvas editing widget, an external JS collaborator
//! exposed as `window.pdfDesigner`.
//!
//! Templates cross the JS boundary as JSON text in both directions, so the
//! widget never shares a mutable alias with the session: `getTemplate`
//! always yields a detached copy, and everything coming back from JS runs
//! through the structural validator before it is trusted.

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::Callback;

use common::check::parse_template;
use common::model::template::Template;
use common::session::{EditorWidget, SessionError};

#[wasm_bindgen]
extern "C" {
    /// Opaque handle returned by the widget's `mount`.
    type DesignerHandle;

    #[wasm_bindgen(js_namespace = ["window", "pdfDesigner"], js_name = mount, catch)]
    fn mount(
        container: &Element,
        template: JsValue,
        options: JsValue,
    ) -> Result<DesignerHandle, JsValue>;

    #[wasm_bindgen(method, js_name = getTemplate)]
    fn get_template(this: &DesignerHandle) -> JsValue;

    #[wasm_bindgen(method, js_name = updateTemplate)]
    fn update_template(this: &DesignerHandle, template: JsValue);

    #[wasm_bindgen(method, js_name = onSaveTemplate)]
    fn on_save_template(this: &DesignerHandle, callback: &Function);

    #[wasm_bindgen(method)]
    fn destroy(this: &DesignerHandle);
}

/// Renders a thrown JS value as error text.
pub fn js_error_text(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn template_to_js(template: &Template) -> Result<JsValue, String> {
    let json = serde_json::to_string(template).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(js_error_text)
}

fn template_from_js(value: &JsValue) -> Result<Template, String> {
    let json: String = js_sys::JSON::stringify(value).map_err(js_error_text)?.into();
    parse_template(&json).map_err(|e| e.to_string())
}

/// The mounted widget plus the save-callback closure keeping it alive.
pub struct PdfDesigner {
    handle: DesignerHandle,
    _on_save: Closure<dyn FnMut(JsValue)>,
}

impl PdfDesigner {
    /// Mounts the widget into `container` bound to `template` and the
    /// resolved font, and registers the widget's own save trigger.
    pub fn mount(
        container: &Element,
        template: &Template,
        font: &JsValue,
        on_save: Callback<Template>,
    ) -> Result<Self, String> {
        let template_js = template_to_js(template)?;
        let options = js_sys::Object::new();
        if !font.is_undefined() && !font.is_null() {
            js_sys::Reflect::set(&options, &JsValue::from_str("font"), font)
                .map_err(js_error_text)?;
        }
        let handle = mount(container, template_js, options.into()).map_err(js_error_text)?;

        let callback = Closure::wrap(Box::new(move |value: JsValue| {
            match template_from_js(&value) {
                Ok(template) => on_save.emit(template),
                Err(err) => gloo_console::error!(format!(
                    "save callback delivered an invalid template: {err}"
                )),
            }
        }) as Box<dyn FnMut(JsValue)>);
        handle.on_save_template(callback.as_ref().unchecked_ref());

        Ok(PdfDesigner {
            handle,
            _on_save: callback,
        })
    }
}

impl EditorWidget for PdfDesigner {
    fn template(&self) -> Result<Template, SessionError> {
        template_from_js(&self.handle.get_template()).map_err(SessionError::Widget)
    }

    fn replace_template(&mut self, template: Template) {
        match template_to_js(&template) {
            Ok(value) => self.handle.update_template(value),
            Err(err) => gloo_console::error!(format!("template handoff to widget failed: {err}")),
        }
    }

    fn destroy(&mut self) {
        self.handle.destroy();
    }
}
