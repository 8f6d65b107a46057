use std::sync::Once;

use similar_core::{update, AppState, ConnectionState, Effect, Msg, StatusClass};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(page_logging::initialize_for_tests);
}

fn payload(state: AppState, raw: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::StreamPayload(raw.to_string()))
}

fn progress(percent: u32) -> String {
    format!(r#"{{"type":"progress","progress":{percent}}}"#)
}

#[test]
fn progress_updates_text_and_keeps_stream_open() {
    init_logging();
    let mut state = AppState::default();
    for percent in [0, 1, 37, 99, 100] {
        let (mut next, effects) = payload(state, &progress(percent));
        let view = next.view();
        assert!(effects.is_empty());
        assert_eq!(view.connection, ConnectionState::Open);
        assert_eq!(view.status.text, "searching");
        assert_eq!(view.status.css_class, StatusClass::Loading);
        assert_eq!(view.status.progress_text, format!("Progress: {percent}%"));
        assert_eq!(view.status.result_html, "");
        assert!(next.consume_dirty());
        state = next;
    }
}

#[test]
fn done_closes_stream_and_sets_result() {
    init_logging();
    let (state, _) = payload(AppState::default(), &progress(40));
    let html = r#"<table><tr data-source="a.fb2" data-candidate="b.fb2"></tr></table>"#;
    let raw = serde_json::to_string(html).unwrap();
    let (state, effects) = payload(state, &format!(r#"{{"type":"done","html":{raw}}}"#));

    let view = state.view();
    assert_eq!(view.connection, ConnectionState::Closed);
    assert_eq!(view.status.text, "done");
    assert_eq!(view.status.css_class, StatusClass::None);
    assert_eq!(view.status.progress_text, "");
    assert_eq!(view.status.result_html, html);
    assert_eq!(
        effects,
        vec![
            Effect::CloseStream,
            Effect::IndexRows {
                html: html.to_string()
            }
        ]
    );
}

#[test]
fn server_error_closes_stream_with_inline_message() {
    init_logging();
    let (state, effects) = payload(
        AppState::default(),
        r#"{"type":"error","message":"book not found"}"#,
    );
    let view = state.view();
    assert_eq!(effects, vec![Effect::CloseStream]);
    assert_eq!(view.connection, ConnectionState::Closed);
    assert_eq!(view.status.text, "error");
    assert_eq!(view.status.css_class, StatusClass::Error);
    assert_eq!(view.status.progress_text, "");
    assert!(view.status.result_html.contains("book not found"));
}

#[test]
fn server_error_without_message_reports_unknown_error() {
    init_logging();
    let (state, _) = payload(AppState::default(), r#"{"type":"error"}"#);
    assert!(state.view().status.result_html.contains("unknown error"));
}

#[test]
fn server_error_with_empty_message_reports_unknown_error() {
    init_logging();
    let (state, _) = payload(AppState::default(), r#"{"type":"error","message":""}"#);
    assert_eq!(
        state.view().status.result_html,
        "<p class=\"error\">request failed: unknown error</p>"
    );
}

#[test]
fn malformed_payload_reports_error_but_keeps_stream_open() {
    init_logging();
    let (state, effects) = payload(AppState::default(), "{not json");
    let view = state.view();
    assert!(effects.is_empty());
    assert_eq!(view.connection, ConnectionState::Open);
    assert_eq!(view.status.text, "connection error");
    assert_eq!(view.status.css_class, StatusClass::Error);

    let (state, effects) = payload(state, &progress(10));
    assert!(effects.is_empty());
    assert_eq!(state.view().status.progress_text, "Progress: 10%");
    assert_eq!(state.view().status.text, "searching");
}

#[test]
fn nothing_is_processed_after_a_terminal_transition() {
    init_logging();
    let terminal: [fn(AppState) -> (AppState, Vec<Effect>); 3] = [
        |state| payload(state, r#"{"type":"done","html":"<p>ok</p>"}"#),
        |state| payload(state, r#"{"type":"error","message":"boom"}"#),
        |state| update(state, Msg::StreamTransportError),
    ];

    for close in terminal {
        let (state, effects) = close(AppState::default());
        assert!(effects.contains(&Effect::CloseStream));
        let mut closed = state;
        closed.consume_dirty();

        for raw in [progress(50), r#"{"type":"done","html":"<p>again</p>"}"#.to_string()] {
            let (mut next, effects) = payload(closed.clone(), &raw);
            assert!(effects.is_empty());
            assert_eq!(next.view(), closed.view());
            assert!(!next.consume_dirty());
        }
    }
}

#[test]
fn transport_error_sets_status_and_is_idempotent() {
    init_logging();
    let (state, _) = payload(AppState::default(), &progress(20));
    let (state, effects) = update(state, Msg::StreamTransportError);
    let view = state.view();
    assert_eq!(effects, vec![Effect::CloseStream]);
    assert_eq!(view.connection, ConnectionState::Closed);
    assert_eq!(view.status.text, "lost connection to server");
    assert_eq!(view.status.css_class, StatusClass::Error);
    assert_eq!(view.status.progress_text, "");

    let (again, effects) = update(state.clone(), Msg::StreamTransportError);
    assert!(effects.is_empty());
    assert_eq!(again.view().status, state.view().status);
}

#[test]
fn transport_error_after_done_keeps_the_result() {
    init_logging();
    let (mut state, _) = payload(AppState::default(), r#"{"type":"done","html":"<p>ok</p>"}"#);
    state.consume_dirty();
    let before = state.view();

    let (mut next, effects) = update(state, Msg::StreamTransportError);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next.view(), before);
    assert_eq!(before.status.text, "done");
}
