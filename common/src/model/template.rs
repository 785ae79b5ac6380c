//! The `Template` model: the serializable unit of work that round-trips
//! between the editor widget, localStorage, JSON files, the schema catalog
//! and the submission endpoint.
//!
//! Wire names follow the JSON format the canvas widget speaks (`basePdf`,
//! `schemas`, `sampledata`), so a template exported here loads unchanged
//! in the widget and vice versa.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::field::FieldSchema;

/// Data-URL of an embedded one-page blank PDF (A4). Used as the background
/// document of [`default_template`] so a fresh session can start editing
/// without any upload.
pub const BLANK_PDF: &str = "data:application/pdf;base64,JVBERi0xLjQKMSAwIG9iago8PC9UeXBlL0NhdGFsb2cvUGFnZXMgMiAwIFI+PgplbmRvYmoKMiAwIG9iago8PC9UeXBlL1BhZ2VzL0tpZHNbMyAwIFJdL0NvdW50IDE+PgplbmRvYmoKMyAwIG9iago8PC9UeXBlL1BhZ2UvUGFyZW50IDIgMCBSL01lZGlhQm94WzAgMCA1OTUuMjggODQxLjg5XS9SZXNvdXJjZXM8PD4+Pj4KZW5kb2JqCnhyZWYKMCA0CjAwMDAwMDAwMDAgNjU1MzUgZiAKMDAwMDAwMDAwOSAwMDAwMCBuIAowMDAwMDAwMDU0IDAwMDAwIG4gCjAwMDAwMDAxMDUgMDAwMDAgbiAKdHJhaWxlcgo8PC9TaXplIDQvUm9vdCAxIDAgUj4+CnN0YXJ0eHJlZgoxOTAKJSVFT0YK";

/// Base name used when exporting the current template as a JSON download.
pub const EXPORT_BASE_NAME: &str = "template";

/// A document template: a background PDF plus one collection of named,
/// positioned field schemas per page, and optional sample values used to
/// preview generated output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Background document as a data-URL.
    #[serde(rename = "basePdf")]
    pub base_pdf: String,

    /// One map of field name to schema per page, in page order.
    pub schemas: Vec<BTreeMap<String, FieldSchema>>,

    /// Optional sample values, one map of field name to value per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampledata: Option<Vec<BTreeMap<String, String>>>,
}

/// The built-in default template: blank background, no fields, empty
/// sample data. Every recovery path (corrupt localStorage, reset) resolves
/// to exactly this value.
pub fn default_template() -> Template {
    Template {
        base_pdf: BLANK_PDF.to_string(),
        schemas: Vec::new(),
        sampledata: Some(Vec::new()),
    }
}
