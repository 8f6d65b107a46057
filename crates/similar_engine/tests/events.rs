use std::sync::{Arc, Mutex};
use std::time::Duration;

use similar_engine::{
    ClientSettings, EngineEvent, EventSink, FailureKind, PushStream, ReqwestPushStream,
    SearchQuery,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn payloads(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::StreamPayload(payload) => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

#[tokio::test]
async fn delivers_payloads_in_order_then_reports_disconnect() {
    let server = MockServer::start().await;
    let body = concat!(
        "data: {\"type\":\"progress\",\"progress\":10}\n\n",
        ": heartbeat\n\n",
        "data: {\"type\":\"progress\",\"progress\":60}\n\n",
        "data: {\"type\":\"done\",\"html\":\"<p>ok</p>\"}\n\n",
    );
    Mock::given(method("GET"))
        .and(path("/similar/events"))
        .and(query_param("file", "book.fb2"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let settings = settings_for(&server);
    let url = settings.events_url(&SearchQuery::new("book.fb2")).unwrap();
    let stream = ReqwestPushStream::new(settings);
    let sink = TestSink::default();

    let err = stream
        .run(url, &sink, CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Disconnected);
    assert_eq!(
        sink.payloads(),
        vec![
            r#"{"type":"progress","progress":10}"#.to_string(),
            r#"{"type":"progress","progress":60}"#.to_string(),
            r#"{"type":"done","html":"<p>ok</p>"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn http_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/similar/events"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let settings = settings_for(&server);
    let url = settings.events_url(&SearchQuery::new("missing.fb2")).unwrap();
    let stream = ReqwestPushStream::new(settings);
    let sink = TestSink::default();

    let err = stream
        .run(url, &sink, CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn cancelling_closes_the_stream_quietly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/similar/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_raw("data: late\n\n", "text/event-stream"),
        )
        .mount(&server)
        .await;

    let settings = settings_for(&server);
    let url = settings.events_url(&SearchQuery::new("book.fb2")).unwrap();
    let stream = ReqwestPushStream::new(settings);
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let closer = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        closer.cancel();
    });

    let result = tokio::time::timeout(Duration::from_secs(2), stream.run(url, &sink, cancel))
        .await
        .expect("cancel should end the stream promptly");
    assert!(result.is_ok());
    assert!(sink.payloads().is_empty());
}
