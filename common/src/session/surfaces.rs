//! Trait seams between the session core and the four surfaces it
//! orchestrates. The frontend supplies the browser-backed implementations
//! (canvas widget bindings, localStorage, HTTP/postMessage sinks); tests
//! supply in-memory ones.

use crate::model::template::Template;
use crate::session::error::SessionError;

/// The visual editing widget holding the live template.
///
/// The widget is the authority for in-progress edits: the session only
/// ever reads a detached copy through [`EditorWidget::template`] and
/// replaces the whole value through [`EditorWidget::replace_template`].
pub trait EditorWidget {
    /// Returns a detached copy of the template currently bound to the
    /// widget. Fails only when the widget hands back a value that no
    /// longer validates as a template.
    fn template(&self) -> Result<Template, SessionError>;

    /// Replaces the widget's template wholesale.
    fn replace_template(&mut self, template: Template);

    /// Tears the widget down. No further calls are made afterwards.
    fn destroy(&mut self);
}

/// Single-slot persistent store for the serialized template.
///
/// Backed by localStorage under the key `"template"` in the browser; a
/// plain in-memory slot in tests.
pub trait TemplateStore {
    /// Raw stored payload, if any. Content is untrusted until validated.
    fn read(&self) -> Option<String>;

    /// Best-effort write. Errors are reported as text and logged at the
    /// call site; they never abort a save.
    fn write(&mut self, raw: &str) -> Result<(), String>;

    /// Removes the stored payload, if any.
    fn clear(&mut self);
}

/// A fire-and-forget delivery target for saved templates.
///
/// Every outbound save path (HTTP submission, cross-frame message) sits
/// behind this interface. Implementations own their own asynchrony and
/// log their own outcome; the session never waits on or reacts to a sink.
pub trait SaveSink {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Dispatches one serialized template payload.
    fn submit(&self, payload: &str);
}
