use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use ledgermind_engine::{
    AnswerClient, AskError, AskSettings, EngineEvent, EngineHandle, EventSink, FailureKind,
    ReqwestAnswerClient, ServiceConfig,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct TestSink {
    tx: Mutex<mpsc::Sender<EngineEvent>>,
}

impl TestSink {
    fn new() -> (Arc<Self>, mpsc::Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel();
        (Arc::new(Self { tx: Mutex::new(tx) }), rx)
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.lock().unwrap().send(event);
    }
}

/// Answers by echoing the question, after an optional delay.
struct EchoClient {
    delay: Duration,
}

#[async_trait::async_trait]
impl AnswerClient for EchoClient {
    async fn ask(&self, question: &str) -> Result<String, AskError> {
        tokio::time::sleep(self.delay).await;
        Ok(format!("echo: {question}"))
    }
}

struct PanickingClient;

#[async_trait::async_trait]
impl AnswerClient for PanickingClient {
    async fn ask(&self, _question: &str) -> Result<String, AskError> {
        panic!("client blew up");
    }
}

fn completed(event: EngineEvent) -> (u64, Result<String, AskError>) {
    match event {
        EngineEvent::AnswerCompleted { request_id, result } => (request_id, result),
    }
}

#[test]
fn ask_reports_one_completion() {
    ledgermind_logging::initialize_for_tests();
    let (sink, events) = TestSink::new();
    let client = Arc::new(EchoClient {
        delay: Duration::ZERO,
    });
    let engine = EngineHandle::new(client, Duration::from_secs(1), sink);

    engine.ask(7, "holdings?").expect("engine running");

    let (request_id, result) = completed(events.recv_timeout(WAIT).expect("completion"));
    assert_eq!(request_id, 7);
    assert_eq!(result.expect("answer"), "echo: holdings?");
    assert!(events.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn hung_client_resolves_as_timeout() {
    ledgermind_logging::initialize_for_tests();
    let (sink, events) = TestSink::new();
    let client = Arc::new(EchoClient {
        delay: Duration::from_secs(60),
    });
    let engine = EngineHandle::new(client, Duration::from_millis(50), sink);

    engine.ask(1, "never").expect("engine running");

    let (request_id, result) = completed(events.recv_timeout(WAIT).expect("completion"));
    assert_eq!(request_id, 1);
    assert_eq!(result.unwrap_err().kind, FailureKind::Timeout);
}

#[test]
fn panicking_client_still_completes() {
    ledgermind_logging::initialize_for_tests();
    let (sink, events) = TestSink::new();
    let engine = EngineHandle::new(Arc::new(PanickingClient), Duration::from_secs(30), sink);

    engine.ask(5, "q").expect("engine running");

    let (request_id, result) = completed(events.recv_timeout(WAIT).expect("completion"));
    assert_eq!(request_id, 5);
    assert_eq!(result.unwrap_err().kind, FailureKind::Internal);

    // The engine keeps serving after a panicked ask.
    engine.ask(6, "again").expect("engine running");
    let (request_id, _) = completed(events.recv_timeout(WAIT).expect("completion"));
    assert_eq!(request_id, 6);
}

#[test]
fn missing_base_url_still_completes() {
    ledgermind_logging::initialize_for_tests();
    let (sink, events) = TestSink::new();
    let client = Arc::new(ReqwestAnswerClient::new(
        ServiceConfig::default(),
        AskSettings::default(),
    ));
    let engine = EngineHandle::new(client, Duration::from_secs(1), sink);

    engine.ask(3, "bar").expect("engine running");

    let (request_id, result) = completed(events.recv_timeout(WAIT).expect("completion"));
    assert_eq!(request_id, 3);
    assert_eq!(result.unwrap_err().kind, FailureKind::MissingBaseUrl);
}

#[tokio::test]
async fn engine_drives_real_http_round_trip() {
    ledgermind_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "$42M" })))
        .mount(&server)
        .await;

    let (sink, events) = TestSink::new();
    let client = Arc::new(ReqwestAnswerClient::new(
        ServiceConfig::new(server.uri()),
        AskSettings::default(),
    ));
    let engine = EngineHandle::new(client, Duration::from_secs(5), sink);
    engine.ask(1, "What is my total AUM?").expect("engine running");

    let event = tokio::task::spawn_blocking(move || events.recv_timeout(WAIT))
        .await
        .expect("join")
        .expect("completion");
    let (request_id, result) = completed(event);
    assert_eq!(request_id, 1);
    assert_eq!(result.expect("answer"), "$42M");
}
