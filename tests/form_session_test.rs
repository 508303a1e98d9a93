use dynform::adapters::{FormSession, SchemaLoader, SubmissionState, SubmitOutcome, TerminalRenderer};
use dynform::domain::{FieldKey, FieldValue, SchemaFormat, VALIDATION_FAILED};
use serde_json::json;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn session_from(schema: &str) -> FormSession {
    let mut session = FormSession::new();
    session.load_str(schema, SchemaFormat::Json).unwrap();
    session
}

fn error_of(session: &FormSession, index: usize) -> Option<String> {
    let id = session.definition().fields()[index].id;
    session.store().error(id).map(String::from)
}

fn snapshot_json(session: &FormSession) -> Option<serde_json::Value> {
    session
        .snapshot()
        .map(|snapshot| serde_json::to_value(snapshot.as_ref()).unwrap())
}

#[test]
fn test_matching_value_is_submitted() {
    let mut session = session_from(r#"[{"type": "text", "validation": "^[a-z]+$"}]"#);

    session.edit_key(FieldKey(0), "abc");
    let outcome = session.submit();

    assert!(outcome.is_submitted());
    assert_eq!(error_of(&session, 0).as_deref(), Some(""));
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "abc"})));
}

#[test]
fn test_mismatching_value_is_rejected() {
    let mut session = session_from(r#"[{"type": "text", "validation": "^[a-z]+$"}]"#);

    session.edit_key(FieldKey(0), "ABC");
    let outcome = session.submit();

    assert_eq!(outcome, SubmitOutcome::Rejected { failed: vec![FieldKey(0)] });
    assert_eq!(error_of(&session, 0).as_deref(), Some(VALIDATION_FAILED));
    assert!(session.snapshot().is_none());
    assert_eq!(session.state(), &SubmissionState::Editing);
}

#[test]
fn test_untouched_dropdown_submits_empty() {
    let mut session = session_from(r#"[{"type": "dropdown", "options": ["a", "b"]}]"#);

    assert!(session.submit().is_submitted());
    assert_eq!(error_of(&session, 0), None);
    assert_eq!(snapshot_json(&session), Some(json!({"field0": ""})));
}

#[test]
fn test_reload_clears_previous_session() {
    let mut session = session_from(r#"[{"type": "text", "validation": "^a"}, {"type": "number"}]"#);
    session.edit_key(FieldKey(0), "abc");
    session.edit_key(FieldKey(1), "7");
    assert!(session.submit().is_submitted());

    session
        .load_str(r#"[{"type": "longtext"}]"#, SchemaFormat::Json)
        .unwrap();

    assert_eq!(session.definition().len(), 1);
    assert!(session.snapshot().is_none());
    assert!(session.store().is_empty());
    assert!(!session.store().has_errors());
}

#[test]
fn test_repeated_submit_gives_equal_snapshots() {
    let mut session = session_from(
        r#"[{"type": "text", "validation": "^[a-z]+$"}, {"type": "number", "min_value": 0, "max_value": 10}]"#,
    );
    session.edit_key(FieldKey(0), "abc");
    session.edit_key(FieldKey(1), "4");

    let first = session.submit();
    let second = session.submit();

    match (first, second) {
        (SubmitOutcome::Submitted(a), SubmitOutcome::Submitted(b)) => assert_eq!(a, b),
        other => panic!("expected two submissions, got {:?}", other),
    }
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "abc", "field1": 4})));
}

#[test]
fn test_fields_without_rules_always_pass() {
    let mut session = session_from(
        r#"[
            {"type": "text"},
            {"type": "longtext", "validation": ""},
            {"type": "number"},
            {"type": "dropdown", "options": [1, 2]}
        ]"#,
    );
    session.edit_key(FieldKey(0), "ANYTHING at all");
    session.edit_key(FieldKey(1), "multi\nline");
    session.edit_key(FieldKey(2), "not a number");
    session.edit_key(FieldKey(3), "2");

    assert!(session.submit().is_submitted());
    assert!(!session.store().has_errors());
    assert_eq!(
        snapshot_json(&session),
        Some(json!({"field0": "ANYTHING at all", "field1": "multi\nline", "field2": "not a number", "field3": 2}))
    );
}

#[test]
fn test_failed_submit_withdraws_snapshot() {
    let mut session = session_from(r#"[{"type": "text", "validation": "^[0-9]+$"}]"#);
    session.edit_key(FieldKey(0), "42");
    assert!(session.submit().is_submitted());

    session.edit_key(FieldKey(0), "forty-two");
    assert!(!session.submit().is_submitted());
    assert!(session.snapshot().is_none());

    session.edit_key(FieldKey(0), "43");
    assert!(session.submit().is_submitted());
    assert_eq!(error_of(&session, 0).as_deref(), Some(""));
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "43"})));
}

#[test]
fn test_invalid_pattern_fails_only_its_field() {
    let mut session = session_from(
        r#"[{"type": "text", "validation": "(unclosed"}, {"type": "text", "validation": "^ok$"}]"#,
    );
    session.edit_key(FieldKey(0), "(unclosed");
    session.edit_key(FieldKey(1), "ok");

    let outcome = session.submit();

    assert_eq!(outcome, SubmitOutcome::Rejected { failed: vec![FieldKey(0)] });
    assert_eq!(error_of(&session, 0).as_deref(), Some(VALIDATION_FAILED));
    assert_eq!(error_of(&session, 1).as_deref(), Some(""));
}

#[test]
fn test_preset_values_seed_the_form() {
    let mut session = session_from(
        r#"[
            {"type": "text", "default_value": "fallback"},
            {"type": "number", "value": 3, "default_value": 9},
            {"type": "dropdown", "options": ["x", "y"], "default_value": "y"}
        ]"#,
    );

    assert!(session.submit().is_submitted());
    assert_eq!(
        snapshot_json(&session),
        Some(json!({"field0": "fallback", "field1": 3, "field2": "y"}))
    );

    session.edit_key(FieldKey(0), "");
    session.submit();
    assert_eq!(session.snapshot().unwrap().get(FieldKey(0)), Some(&FieldValue::Text(String::new())));
}

#[test]
fn test_parse_error_keeps_loaded_form() {
    let mut session = session_from(r#"[{"type": "text"}]"#);
    session.edit_key(FieldKey(0), "kept");

    assert!(session.load_str("{ not: json", SchemaFormat::Json).is_err());

    assert_eq!(session.definition().len(), 1);
    assert_eq!(
        session.render().fields[0].value,
        FieldValue::Text("kept".to_string())
    );
}

#[test]
fn test_yaml_schema_from_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("signup.yaml");
    fs::write(
        &path,
        r#"
- type: text
  validation: "^[a-z]+$"
- type: dropdown
  options: [red, green]
"#,
    )?;

    let definition = SchemaLoader::new(None).load(&path)?;
    let mut session = FormSession::with_definition(definition);
    session.edit_key(FieldKey(0), "alice");
    session.edit_key(FieldKey(1), "green");

    assert!(session.submit().is_submitted());
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "alice", "field1": "green"})));
    Ok(())
}

#[test]
fn test_terminal_prompt_drives_a_submission() -> anyhow::Result<()> {
    let mut session = session_from(r#"[{"type": "text", "validation": "^[a-z]+$"}, {"type": "number"}]"#);
    let renderer = TerminalRenderer::new(false);

    let mut input = Cursor::new("abc\n12\n");
    let mut output = Vec::new();
    renderer.prompt(&mut session, None, &mut input, &mut output)?;

    assert!(session.submit().is_submitted());
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "abc", "field1": 12})));
    Ok(())
}

#[test]
fn test_number_rules_see_the_typed_text() {
    let mut session = session_from(r#"[{"type": "number", "validation": "^\\d+\\.\\d{2}$"}]"#);

    session.edit_key(FieldKey(0), "1.50");
    assert_eq!(session.render().fields[0].value.to_string(), "1.50");
    assert!(session.submit().is_submitted());
    assert_eq!(error_of(&session, 0).as_deref(), Some(""));
    assert_eq!(snapshot_json(&session), Some(json!({"field0": 1.5})));

    let mut session = session_from(r#"[{"type": "number", "validation": "^\\d{3}$"}]"#);
    session.edit_key(FieldKey(0), "007");
    assert!(session.submit().is_submitted());
    assert_eq!(snapshot_json(&session), Some(json!({"field0": 7})));
}

#[test]
fn test_number_widget_value_is_not_rewritten_while_typing() {
    let mut session = session_from(r#"[{"type": "number"}]"#);

    for typed in ["1", "1.", "1.0", "1.05"] {
        session.edit_key(FieldKey(0), typed);
        assert_eq!(session.render().fields[0].value.to_string(), typed);
    }
}

#[test]
fn test_loosely_typed_schemas_still_load() {
    for schema in [
        r#"[{"type": 5}]"#,
        r#"[{"type": "text", "options": [true]}]"#,
        r#"[{"type": "number", "min_value": "3"}]"#,
        r#"[{"type": "dropdown", "options": ["a", null]}]"#,
    ] {
        let mut session = FormSession::new();
        assert!(session.load_str(schema, SchemaFormat::Json).is_ok(), "{} did not load", schema);
        assert_eq!(session.definition().len(), 1);
        assert!(session.submit().is_submitted());
    }

    let mut session = session_from(r#"[{"type": 5}]"#);
    assert_eq!(session.render().fields[0].label, "Enter 5:");
    session.edit_key(FieldKey(0), "five");
    session.submit();
    assert_eq!(snapshot_json(&session), Some(json!({"field0": "five"})));
}
