//! Component state for the designer shell.

use wasm_bindgen::JsValue;
use yew::prelude::*;

use common::model::template::Template;
use common::session::Session;

use crate::sinks::{HttpSubmitSink, ParentFrameSink};
use crate::storage::LocalStore;
use crate::widget::PdfDesigner;

use super::props::DesignerProps;

/// Main state container for the designer shell component.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct DesignerShell {
    /// The template lifecycle orchestrator owning store, widget and sinks.
    pub session: Session<PdfDesigner, LocalStore>,

    /// Reference to the container the canvas widget mounts into.
    pub container_ref: NodeRef,

    /// Font resource resolved at startup, handed to the widget on mount
    /// and to every generation call. `UNDEFINED` until resolved (or when
    /// resolution failed).
    pub font: JsValue,

    /// Template resolved from the store at startup, parked here until the
    /// font arrives and the widget can be mounted.
    pub pending_initial: Option<Template>,

    /// Catalog entry currently shown in the dropdown. Mirrors the
    /// session's selection so the view stays a pure function of state.
    pub selected_entry: String,

    /// Guard to avoid running first-render initialization more than once.
    pub loaded: bool,

    /// True while a generation call is outstanding (disables the button).
    pub generating: bool,
}

impl DesignerShell {
    pub fn new(props: &DesignerProps) -> Self {
        let mut session = Session::new(LocalStore::new());
        session.add_sink(Box::new(HttpSubmitSink::new(props.submit_url.clone())));
        if let Some(origin) = &props.parent_origin {
            session.add_sink(Box::new(ParentFrameSink::new(origin.clone())));
        }

        DesignerShell {
            session,
            container_ref: NodeRef::default(),
            font: JsValue::UNDEFINED,
            pending_initial: None,
            selected_entry: String::new(),
            loaded: false,
            generating: false,
        }
    }
}
