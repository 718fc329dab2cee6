//! End-to-end behaviour of schema parsing, validation and submit
//!
//! Each test drives the public API only: build a schema, feed events into a
//! SimpleForm, and inspect states, submit outcomes and the view.

use pretty_assertions::assert_eq;
use simpleform::*;
use std::io::Write;
use std::sync::{Arc, Mutex};

fn build(schema: Schema) -> SimpleForm {
    SimpleForm::new(&schema, FormConfig::default()).unwrap()
}

#[test]
fn test_compact_email_field() {
    let fields = Schema::from_pairs([("mail", "*email|you@x.com")]).fields().unwrap();
    let mail = &fields[0];
    assert_eq!(mail.name, "mail");
    assert!(mail.required);
    assert_eq!(mail.field_type, FieldType::Email);
    assert_eq!(mail.placeholder, "you@x.com");
}

#[test]
fn test_options_and_textarea_tokens() {
    let fields = Schema::from_pairs([("pick", "[A,B,C]"), ("notes", "5")]).fields().unwrap();
    assert_eq!(
        fields[0].field_type.choices(),
        Some(&["A".to_string(), "B".to_string(), "C".to_string()][..])
    );
    assert_eq!(fields[1].field_type.rows(), Some(5));
}

#[test]
fn test_required_and_plain_fields() {
    let mut form = build(Schema::from_pairs([("req", "*text"), ("opt", "text")]));
    form.change(0, "").unwrap();
    form.change(1, "something").unwrap();

    assert!(form.state(0).unwrap().error);
    let opt = form.state(1).unwrap();
    assert!(!opt.error);
    assert!(!opt.warning);
}

#[test]
fn test_email_warnings() {
    let mut form = build(Schema::from_pairs([("mail", "email")]));
    form.change(0, "not-an-email").unwrap();
    assert!(form.state(0).unwrap().warning);
    form.change(0, "a@b.co").unwrap();
    assert!(!form.state(0).unwrap().warning);
}

#[test]
fn test_successful_submit_invokes_callback_once() {
    let received: Arc<Mutex<Vec<FormValues>>> = Arc::default();
    let sink = Arc::clone(&received);

    let mut form = build(Schema::from_pairs([
        ("first", "*text"),
        ("last", "*text"),
        ("agree", "[Yes]"),
    ]))
    .on_submit(move |values| sink.lock().unwrap().push(values.clone()));

    form.change_by_key("first", "Grace").unwrap();
    form.change_by_key("last", "Hopper").unwrap();
    let report = form.submit();

    assert!(report.outcome.is_submitted());
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let names: Vec<_> = received[0].keys().cloned().collect();
    assert_eq!(names, vec!["first", "last", "agree"]);
    assert_eq!(received[0]["agree"], "");
}

#[test]
fn test_failed_submit_never_calls_back() {
    let called = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&called);

    let mut form = build(Schema::from_pairs([("first", "*text"), ("mail", "email")]))
        .on_submit(move |_| *counter.lock().unwrap() += 1);

    for _ in 0..3 {
        let report = form.submit();
        assert_eq!(report.outcome, SubmitOutcome::Rejected { errors: 1 });
    }
    assert_eq!(*called.lock().unwrap(), 0);
    assert!(form.states().iter().all(|s| s.touched));

    form.change(0, "fixed").unwrap();
    assert!(form.submit().outcome.is_submitted());
    assert_eq!(*called.lock().unwrap(), 1);
}

#[test]
fn test_option_toggle_clears() {
    let mut form = build(Schema::from_pairs([("colour", "[Red,Green]")]));
    form.toggle_option(0, "Red").unwrap();
    form.toggle_option(0, "Red").unwrap();
    assert_eq!(form.state(0).unwrap().value, "");
}

#[test]
fn test_numeric_rejects_negative() {
    let mut form = build(Schema::from_pairs([("amount", "£"), ("count", "number")]));
    form.change(0, "10").unwrap();
    assert_eq!(form.change(0, "-10").unwrap(), ChangeOutcome::Ignored);
    assert_eq!(form.state(0).unwrap().value, "10");
    assert_eq!(form.change(1, "-0.5").unwrap(), ChangeOutcome::Ignored);
    assert_eq!(form.state(1).unwrap().value, "");
}

#[test]
fn test_sticky_message_survives_fix() {
    let mut form = build(Schema::from_pairs([("name", "*text")]));
    form.submit();
    form.change(0, "Alan").unwrap();
    let state = form.state(0).unwrap();
    assert!(!state.error);
    assert_eq!(state.message.as_deref(), Some("Required field"));
}

#[test]
fn test_load_schema_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"name": "*text", "topic": "[Sales,Support]"}}"#).unwrap();

    let schema = Schema::load(file.path()).unwrap();
    let form = build(schema);
    assert_eq!(form.fields().len(), 2);
    assert!(form.field(1).unwrap().is_options());
}

#[test]
fn test_unknown_extension() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    assert!(matches!(Schema::load(file.path()), Err(SchemaError::UnsupportedFormat(_))));
}
