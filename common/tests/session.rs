//! Lifecycle properties of the template session, exercised against
//! in-memory stand-ins for the widget, the persistent store and the save
//! sinks.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use common::check::parse_template;
use common::model::field::{FieldSchema, Position};
use common::model::template::{default_template, Template};
use common::session::{
    EditorWidget, ImportOutcome, Phase, SaveSink, Session, SessionError, TemplateStore,
};

struct FakeWidget {
    template: Template,
    destroyed: Rc<Cell<bool>>,
}

impl FakeWidget {
    fn new(template: Template) -> (Self, Rc<Cell<bool>>) {
        let destroyed = Rc::new(Cell::new(false));
        (
            FakeWidget {
                template,
                destroyed: destroyed.clone(),
            },
            destroyed,
        )
    }
}

impl EditorWidget for FakeWidget {
    fn template(&self) -> Result<Template, SessionError> {
        Ok(self.template.clone())
    }

    fn replace_template(&mut self, template: Template) {
        self.template = template;
    }

    fn destroy(&mut self) {
        self.destroyed.set(true);
    }
}

/// Store whose slot is shared with the test, so a second session can be
/// started over the same persisted state.
#[derive(Clone, Default)]
struct FakeStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl TemplateStore for FakeStore {
    fn read(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn write(&mut self, raw: &str) -> Result<(), String> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&mut self) {
        *self.slot.borrow_mut() = None;
    }
}

/// Sink that records every payload it is handed.
#[derive(Clone, Default)]
struct RecordingSink {
    seen: Rc<RefCell<Vec<String>>>,
}

impl SaveSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn submit(&self, payload: &str) {
        self.seen.borrow_mut().push(payload.to_string());
    }
}

/// Simulates a submission endpoint that is down: the delivery goes
/// nowhere, which for a fire-and-forget sink is all a network error
/// amounts to.
struct DeadSink;

impl SaveSink for DeadSink {
    fn name(&self) -> &'static str {
        "dead"
    }

    fn submit(&self, _payload: &str) {}
}

fn rich_template() -> Template {
    let mut fields = BTreeMap::new();
    fields.insert(
        "client_name".to_string(),
        FieldSchema {
            kind: "text".to_string(),
            position: Position { x: 10.0, y: 20.0 },
            width: 80.0,
            height: 12.0,
            style: BTreeMap::new(),
        },
    );
    let mut samples = BTreeMap::new();
    samples.insert("client_name".to_string(), "Jane Doe".to_string());
    Template {
        base_pdf: "data:application/pdf;base64,AA==".to_string(),
        schemas: vec![fields],
        sampledata: Some(vec![samples]),
    }
}

fn ready_session(
    store: FakeStore,
    template: Template,
) -> (Session<FakeWidget, FakeStore>, Rc<Cell<bool>>) {
    let mut session = Session::new(store);
    let (widget, destroyed) = FakeWidget::new(template);
    session.attach_widget(widget);
    (session, destroyed)
}

#[test]
fn initialize_falls_back_to_default_when_store_is_empty() {
    let mut session: Session<FakeWidget, _> = Session::new(FakeStore::default());
    assert_eq!(session.resolve_initial_template(), default_template());
}

#[test]
fn initialize_clears_corrupt_store_and_falls_back() {
    let store = FakeStore::default();
    *store.slot.borrow_mut() = Some("{not json".to_string());

    let mut session: Session<FakeWidget, _> = Session::new(store.clone());
    assert_eq!(session.resolve_initial_template(), default_template());
    // The stale entry must not survive.
    assert!(store.slot.borrow().is_none());
}

#[test]
fn initialize_clears_structurally_invalid_store() {
    let store = FakeStore::default();
    *store.slot.borrow_mut() = Some(r#"{"schemas": []}"#.to_string());

    let mut session: Session<FakeWidget, _> = Session::new(store.clone());
    assert_eq!(session.resolve_initial_template(), default_template());
    assert!(store.slot.borrow().is_none());
}

#[test]
fn initialize_recovers_a_valid_stored_template() {
    let store = FakeStore::default();
    let stored = rich_template();
    *store.slot.borrow_mut() = Some(serde_json::to_string(&stored).unwrap());

    let mut session: Session<FakeWidget, _> = Session::new(store);
    assert_eq!(session.resolve_initial_template(), stored);
}

#[test]
fn file_import_is_atomic_on_malformed_input() {
    let (mut session, _) = ready_session(FakeStore::default(), rich_template());
    let before = session.live_template().unwrap();

    let ticket = session.begin_file_import();
    let err = session.finish_file_import(ticket, "[1, 2, 3]").unwrap_err();
    assert!(matches!(err, SessionError::Validation(_)));
    assert_eq!(session.live_template().unwrap(), before);

    let ticket = session.begin_file_import();
    let err = session
        .finish_file_import(ticket, r#"{"basePdf": 7, "schemas": []}"#)
        .unwrap_err();
    assert!(err.to_string().contains("basePdf"));
    assert_eq!(session.live_template().unwrap(), before);
}

#[test]
fn catalog_import_is_atomic_on_fetch_failure() {
    let (mut session, _) = ready_session(FakeStore::default(), rich_template());
    let before = session.live_template().unwrap();

    let ticket = session.begin_catalog_import("invoice.json");
    let err = session
        .finish_catalog_import(ticket, Err("connection refused".to_string()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)));
    assert_eq!(session.live_template().unwrap(), before);
    assert_eq!(session.selected_catalog_entry(), "invoice.json");
}

#[test]
fn export_then_import_round_trips() {
    let (mut session, _) = ready_session(FakeStore::default(), rich_template());

    let export = session.export_current().unwrap();
    assert_eq!(export.file_name, "template.json");

    let ticket = session.begin_file_import();
    assert_eq!(
        session.finish_file_import(ticket, &export.json).unwrap(),
        ImportOutcome::Applied
    );
    assert_eq!(session.live_template().unwrap(), rich_template());
}

#[test]
fn replace_base_pdf_touches_nothing_else() {
    let (mut session, _) = ready_session(FakeStore::default(), rich_template());
    let before = session.live_template().unwrap();

    session
        .replace_base_pdf("data:application/pdf;base64,BB==".to_string())
        .unwrap();

    let after = session.live_template().unwrap();
    assert_eq!(after.base_pdf, "data:application/pdf;base64,BB==");
    assert_eq!(after.schemas, before.schemas);
    assert_eq!(after.sampledata, before.sampledata);
}

#[test]
fn save_fans_out_to_store_and_sinks() {
    let store = FakeStore::default();
    let sink = RecordingSink::default();
    let (mut session, _) = ready_session(store.clone(), rich_template());
    session.add_sink(Box::new(sink.clone()));

    session.save_current(None).unwrap();

    let payload = store.slot.borrow().clone().expect("store written");
    assert_eq!(parse_template(&payload).unwrap(), rich_template());
    assert_eq!(sink.seen.borrow().as_slice(), &[payload.clone()]);
    assert_eq!(session.pending_upload(), Some(payload.as_str()));
}

#[test]
fn save_override_wins_over_the_live_template() {
    let store = FakeStore::default();
    let (mut session, _) = ready_session(store.clone(), rich_template());

    session.save_current(Some(default_template())).unwrap();

    let payload = store.slot.borrow().clone().expect("store written");
    assert_eq!(parse_template(&payload).unwrap(), default_template());
}

#[test]
fn local_write_survives_a_dead_submission_sink() {
    let store = FakeStore::default();
    let (mut session, _) = ready_session(store.clone(), rich_template());
    session.add_sink(Box::new(DeadSink));

    session.save_current(None).unwrap();
    assert!(store.slot.borrow().is_some());

    // A fresh session over the same store recovers the saved template.
    let mut next: Session<FakeWidget, _> = Session::new(store);
    assert_eq!(next.resolve_initial_template(), rich_template());
}

#[test]
fn stale_catalog_response_is_discarded() {
    let (mut session, _) = ready_session(FakeStore::default(), default_template());

    let template_a = {
        let mut t = rich_template();
        t.base_pdf = "data:application/pdf;base64,AAAA".to_string();
        t
    };
    let template_b = {
        let mut t = rich_template();
        t.base_pdf = "data:application/pdf;base64,BBBB".to_string();
        t
    };

    let ticket_a = session.begin_catalog_import("a.json");
    let ticket_b = session.begin_catalog_import("b.json");

    // B resolves first and is applied.
    assert_eq!(
        session
            .finish_catalog_import(ticket_b, Ok(serde_json::to_string(&template_b).unwrap()))
            .unwrap(),
        ImportOutcome::Applied
    );
    // A resolves late and must be dropped on the floor.
    assert_eq!(
        session
            .finish_catalog_import(ticket_a, Ok(serde_json::to_string(&template_a).unwrap()))
            .unwrap(),
        ImportOutcome::Stale
    );

    assert_eq!(session.live_template().unwrap(), template_b);
    assert_eq!(session.selected_catalog_entry(), "b.json");
}

#[test]
fn stale_file_import_result_is_discarded() {
    let (mut session, _) = ready_session(FakeStore::default(), default_template());

    let older = {
        let mut t = rich_template();
        t.base_pdf = "data:application/pdf;base64,AAAA".to_string();
        t
    };
    let newer = rich_template();

    let ticket_a = session.begin_file_import();
    let ticket_b = session.begin_file_import();

    // The second pick finishes reading first and is applied.
    assert_eq!(
        session
            .finish_file_import(ticket_b, &serde_json::to_string(&newer).unwrap())
            .unwrap(),
        ImportOutcome::Applied
    );
    // The first pick resolves late and must be dropped on the floor.
    assert_eq!(
        session
            .finish_file_import(ticket_a, &serde_json::to_string(&older).unwrap())
            .unwrap(),
        ImportOutcome::Stale
    );

    assert_eq!(session.live_template().unwrap(), newer);
}

#[test]
fn preview_request_carries_the_live_sample_data() {
    let (session, _) = ready_session(FakeStore::default(), rich_template());

    let request = session.preview_request().unwrap();
    assert_eq!(request.template, rich_template());
    assert_eq!(Some(request.inputs), rich_template().sampledata);
}

#[test]
fn preview_inputs_default_to_empty_without_sample_data() {
    let mut template = rich_template();
    template.sampledata = None;
    let (session, _) = ready_session(FakeStore::default(), template.clone());

    let request = session.preview_request().unwrap();
    assert!(request.inputs.is_empty());
    assert_eq!(request.template, template);
}

#[test]
fn reset_restores_the_default_and_clears_the_store() {
    let store = FakeStore::default();
    let (mut session, _) = ready_session(store.clone(), rich_template());
    session.save_current(None).unwrap();
    assert!(store.slot.borrow().is_some());

    session.reset_to_default();

    assert!(store.slot.borrow().is_none());
    assert_eq!(session.live_template().unwrap(), default_template());
}

#[test]
fn reset_clears_the_catalog_selection() {
    let (mut session, _) = ready_session(FakeStore::default(), rich_template());
    session.begin_catalog_import("invoice.json");
    assert_eq!(session.selected_catalog_entry(), "invoice.json");

    session.reset_to_default();
    assert_eq!(session.selected_catalog_entry(), "");
}

#[test]
fn teardown_destroys_the_widget() {
    let (mut session, destroyed) = ready_session(FakeStore::default(), default_template());
    session.teardown();
    assert!(destroyed.get());
    assert_eq!(session.phase(), Phase::Terminated);
}

#[test]
#[should_panic(expected = "after teardown")]
fn operations_after_teardown_are_fatal() {
    let (mut session, _) = ready_session(FakeStore::default(), default_template());
    session.teardown();
    session.reset_to_default();
}

#[test]
#[should_panic(expected = "before a widget")]
fn widget_operations_before_attach_are_fatal() {
    let mut session: Session<FakeWidget, _> = Session::new(FakeStore::default());
    session.begin_file_import();
}
