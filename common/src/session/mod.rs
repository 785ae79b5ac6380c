//! Template lifecycle orchestration.
//!
//! [`Session`] owns the lifecycle of the one template bound to the editor
//! widget: initial resolution from the persistent store, wholesale
//! replacement on every load path (base-PDF swap, file import, catalog
//! import, reset), and the fan-out save path. It is sans-I/O: the widget,
//! the store and the save sinks are reached through the traits in
//! [`surfaces`], and operations that span an async boundary are split into
//! `begin_*`/`finish_*` halves joined by a [`LoadTicket`].
//!
//! Policy, in one place:
//! - every load path is atomic: a template is either fully validated and
//!   fully swapped in, or the prior template stays untouched;
//! - every save path is best-effort fan-out: the local store write and the
//!   sinks proceed independently, none blocks or reverts another;
//! - corrupt local state never blocks startup (silent fallback to the
//!   default template), while user-initiated imports always surface the
//!   raw validation failure;
//! - calls after [`Session::teardown`] (or widget calls before
//!   [`Session::attach_widget`]) are programming errors and panic.

mod error;
mod load;
mod surfaces;

pub use error::SessionError;
pub use load::{ImportOutcome, LoadClass, LoadTicket};
pub use surfaces::{EditorWidget, SaveSink, TemplateStore};

use std::collections::BTreeMap;

use crate::check::parse_template;
use crate::model::template::{default_template, Template, EXPORT_BASE_NAME};
use load::LoadGuard;

/// Lifecycle phase of the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No widget attached yet; only initial-template resolution is valid.
    Uninitialized,
    /// Widget attached, all operations available.
    Ready,
    /// Widget destroyed; any further operation is a programming error.
    Terminated,
}

/// A template export ready to be offered as a file download.
#[derive(Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub json: String,
}

/// Everything the generation collaborator needs for one preview.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GenerateRequest {
    pub template: Template,
    pub inputs: Vec<BTreeMap<String, String>>,
}

/// The template lifecycle orchestrator. One per editing session.
pub struct Session<W: EditorWidget, S: TemplateStore> {
    store: S,
    widget: Option<W>,
    phase: Phase,
    sinks: Vec<Box<dyn SaveSink>>,
    selected_catalog_entry: String,
    pending_upload: Option<String>,
    loads: LoadGuard,
}

impl<W: EditorWidget, S: TemplateStore> Session<W, S> {
    pub fn new(store: S) -> Self {
        Session {
            store,
            widget: None,
            phase: Phase::Uninitialized,
            sinks: Vec::new(),
            selected_catalog_entry: String::new(),
            pending_upload: None,
            loads: LoadGuard::default(),
        }
    }

    /// Registers a save sink. Sinks are invoked in registration order on
    /// every save, each fire-and-forget.
    pub fn add_sink(&mut self, sink: Box<dyn SaveSink>) {
        self.sinks.push(sink);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Name of the catalog entry most recently chosen for import, or empty.
    pub fn selected_catalog_entry(&self) -> &str {
        &self.selected_catalog_entry
    }

    /// Last payload handed to the save fan-out, kept for diagnostics only.
    pub fn pending_upload(&self) -> Option<&str> {
        self.pending_upload.as_deref()
    }

    /// Resolves the template the session starts with: the stored payload
    /// when it validates, otherwise the built-in default. A stored payload
    /// that fails validation is removed so the next start is clean; the
    /// failure is logged, never surfaced, since corrupt local state must not
    /// block editing.
    pub fn resolve_initial_template(&mut self) -> Template {
        match self.store.read() {
            None => default_template(),
            Some(raw) => match parse_template(&raw) {
                Ok(template) => template,
                Err(err) => {
                    log::warn!("stored template rejected, falling back to default: {err}");
                    self.store.clear();
                    default_template()
                }
            },
        }
    }

    /// Binds the constructed editor widget and moves the session to
    /// `Ready`. Panics when called twice or after teardown.
    pub fn attach_widget(&mut self, widget: W) {
        assert!(
            self.phase == Phase::Uninitialized,
            "attach_widget called on a session that is already {:?}",
            self.phase
        );
        self.widget = Some(widget);
        self.phase = Phase::Ready;
    }

    /// A detached copy of the template currently bound to the widget.
    pub fn live_template(&self) -> Result<Template, SessionError> {
        self.widget().template()
    }

    /// Swaps the background document of the live template, leaving field
    /// schemas and sample data untouched.
    pub fn replace_base_pdf(&mut self, data_url: String) -> Result<(), SessionError> {
        let mut template = self.live_template()?;
        template.base_pdf = data_url;
        self.widget_mut().replace_template(template);
        Ok(())
    }

    /// Serializes the live template as formatted JSON under the fixed
    /// export base name.
    pub fn export_current(&self) -> Result<ExportFile, SessionError> {
        let template = self.live_template()?;
        let json = serde_json::to_string_pretty(&template)?;
        Ok(ExportFile {
            file_name: format!("{EXPORT_BASE_NAME}.json"),
            json,
        })
    }

    /// Pushes the built-in default template into the widget and deletes
    /// the persisted entry, so subsequent session starts resolve to the
    /// default again. The catalog selection is cleared along with it.
    pub fn reset_to_default(&mut self) {
        self.widget_mut().replace_template(default_template());
        self.store.clear();
        self.selected_catalog_entry.clear();
    }

    /// Starts a template-file import. The caller reads the file off-thread
    /// and hands the content to [`Session::finish_file_import`] with the
    /// returned ticket.
    pub fn begin_file_import(&mut self) -> LoadTicket {
        self.assert_ready();
        self.loads.begin(LoadClass::File)
    }

    /// Completes a template-file import: parse, validate, swap in. On any
    /// failure the live template stays untouched and the error carries the
    /// raw validation detail for the user.
    pub fn finish_file_import(
        &mut self,
        ticket: LoadTicket,
        content: &str,
    ) -> Result<ImportOutcome, SessionError> {
        if !self.loads.is_current(ticket) {
            log::debug!("discarding stale file import result");
            return Ok(ImportOutcome::Stale);
        }
        let template = parse_template(content)?;
        self.widget_mut().replace_template(template);
        Ok(ImportOutcome::Applied)
    }

    /// Starts a catalog import for the named entry and records it as the
    /// current selection. The caller fetches the entry and hands the
    /// outcome to [`Session::finish_catalog_import`].
    pub fn begin_catalog_import(&mut self, entry: &str) -> LoadTicket {
        self.assert_ready();
        self.selected_catalog_entry = entry.to_string();
        self.loads.begin(LoadClass::Catalog)
    }

    /// Completes a catalog import. Transport failures abort the import
    /// (there is nothing to validate) and are logged; validation failures
    /// follow the same path as file imports. Stale completions are
    /// discarded without touching the live template.
    pub fn finish_catalog_import(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<String, String>,
    ) -> Result<ImportOutcome, SessionError> {
        if !self.loads.is_current(ticket) {
            log::debug!("discarding stale catalog import result");
            return Ok(ImportOutcome::Stale);
        }
        let body = match fetched {
            Ok(body) => body,
            Err(err) => {
                log::error!("catalog fetch failed: {err}");
                return Err(SessionError::Transport(err));
            }
        };
        let template = parse_template(&body)?;
        self.widget_mut().replace_template(template);
        Ok(ImportOutcome::Applied)
    }

    /// Saves the given template (or the live one when `None`): one
    /// serialization, then an independent fan-out. The store write is
    /// synchronous best-effort; a failure is logged and does not stop the
    /// sinks. Sinks are fire-and-forget and cannot fail the save.
    pub fn save_current(&mut self, override_template: Option<Template>) -> Result<(), SessionError> {
        let template = match override_template {
            Some(template) => template,
            None => self.live_template()?,
        };
        let payload = serde_json::to_string(&template)?;

        if let Err(err) = self.store.write(&payload) {
            log::error!("local template write failed: {err}");
        }
        for sink in &self.sinks {
            log::info!("submitting template to sink `{}`", sink.name());
            sink.submit(&payload);
        }
        self.pending_upload = Some(payload);
        Ok(())
    }

    /// Assembles the generation request for a preview: the live template
    /// plus its sample data (empty when absent). Generation itself happens
    /// in the collaborator; its failure never touches the live template.
    pub fn preview_request(&self) -> Result<GenerateRequest, SessionError> {
        let template = self.live_template()?;
        let inputs = template.sampledata.clone().unwrap_or_default();
        Ok(GenerateRequest { template, inputs })
    }

    /// Destroys the widget and terminates the session. Every operation
    /// afterwards panics.
    pub fn teardown(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.destroy();
        }
        self.phase = Phase::Terminated;
    }

    fn assert_ready(&self) {
        match self.phase {
            Phase::Ready => {}
            Phase::Uninitialized => panic!("session operation before a widget was attached"),
            Phase::Terminated => panic!("session operation after teardown"),
        }
    }

    fn widget(&self) -> &W {
        self.assert_ready();
        self.widget.as_ref().expect("widget present in Ready phase")
    }

    fn widget_mut(&mut self) -> &mut W {
        self.assert_ready();
        self.widget.as_mut().expect("widget present in Ready phase")
    }
}
