use wasm_bindgen::JsValue;

use common::model::template::Template;
use common::session::LoadTicket;

pub enum Msg {
    FontReady(Result<JsValue, String>),
    BasePdfSelected(web_sys::File),
    BasePdfRead(Result<String, String>),
    TemplateFileSelected(web_sys::File),
    TemplateFileRead {
        ticket: LoadTicket,
        result: Result<String, String>,
    },
    CatalogEntrySelected(String),
    CatalogFetched {
        ticket: LoadTicket,
        result: Result<String, String>,
    },
    ExportTemplate,
    /// `Some` when triggered by the widget's own save callback, `None`
    /// when triggered from the toolbar (the live template is pulled then).
    SaveTemplate(Option<Template>),
    ResetTemplate,
    GeneratePdf,
    GenerateFinished(Result<Vec<u8>, String>),
}
