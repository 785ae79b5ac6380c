//! Properties for the designer shell component.

use yew::prelude::*;

/// Configuration handed down by the hosting page.
#[derive(Properties, PartialEq, Clone)]
pub struct DesignerProps {
    /// Names offered in the catalog dropdown; each resolves to
    /// `{catalog_base}/{entry}` when imported.
    #[prop_or_default]
    pub catalog_entries: Vec<String>,

    /// Base URL of the schema catalog.
    #[prop_or("/schemas".to_string())]
    pub catalog_base: String,

    /// Submission endpoint saved templates are POSTed to.
    #[prop_or("/api/templates/save".to_string())]
    pub submit_url: String,

    /// Target origin for cross-frame save notifications. `None` disables
    /// the parent-frame sink (the editor is not embedded).
    #[prop_or_default]
    pub parent_origin: Option<String>,
}
