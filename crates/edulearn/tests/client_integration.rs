//! Integration tests for the chat client and the generate flow.
//!
//! A wiremock server stands in for the chat-completion endpoint.

use edulearn::config::CourseConfig;
use edulearn::credentials::{API_KEY_STORAGE_KEY, MemoryCredentialStore};
use edulearn::error::GenerateError;
use edulearn::session::Session;
use edulearn::{ChatRequest, CompletionClient, Message, OpenAiClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/v1/chat/completions";

const WELL_FORMED_REPLY: &str = "COURSE_OBJECTIVE: Understand cell biology.\n\n\
SYLLABUS:\n1. Cells\n2. DNA\n\n\
LEARNING_OUTCOMES:\n\
KNOWLEDGE: Name the organelles.\n\
COMPREHENSION: Explain mitosis.\n\
APPLICATION: Use a microscope.\n\n\
ASSESSMENTS:\n- Lab report\n\n\
READINGS:\n- Alberts, Molecular Biology of the Cell";

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 250, "completion_tokens": 400, "total_tokens": 650 }
    })
}

fn config_for(server: &MockServer) -> CourseConfig {
    CourseConfig::default()
        .with_api_base_url(format!("{}{CHAT_PATH}", server.uri()))
        .with_timeout_secs(5)
}

fn simple_request() -> ChatRequest {
    ChatRequest {
        model: "gpt-3.5-turbo".into(),
        messages: vec![Message::user("hi")],
        max_tokens: 10,
        temperature: 0.7,
    }
}

#[tokio::test]
async fn chat_sends_bearer_token_and_returns_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config_for(&server)).unwrap();
    let completion = client.chat("sk-test", &simple_request()).await.unwrap();

    assert_eq!(completion.content, "hello");
    assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
    assert_eq!(completion.usage.unwrap().total_tokens, Some(650));
}

#[tokio::test]
async fn request_body_carries_prompt_and_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 3000,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = OpenAiClient::new(&config).unwrap();
    let request = config.build_request("Cell Biology");
    let reply = client.complete("sk", &request).await.unwrap();
    assert_eq!(reply, "ok");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(
        body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("for the course: \"Cell Biology\"")
    );
}

#[tokio::test]
async fn api_error_message_is_used_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "message": "Incorrect API key provided: sk-bad.",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config_for(&server)).unwrap();
    let err = client.chat("sk-bad", &simple_request()).await.unwrap_err();

    assert!(matches!(err, GenerateError::Api { status: 401, .. }));
    assert_eq!(err.to_string(), "Incorrect API key provided: sk-bad.");
}

#[tokio::test]
async fn api_error_without_message_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config_for(&server)).unwrap();
    let err = client.chat("sk", &simple_request()).await.unwrap_err();

    assert_eq!(err.to_string(), "API request failed: 503");
}

#[tokio::test]
async fn success_without_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&config_for(&server)).unwrap();
    let err = client.chat("sk", &simple_request()).await.unwrap_err();
    assert!(matches!(err, GenerateError::MalformedResponse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let config = CourseConfig::default()
        .with_api_base_url("http://127.0.0.1:9/v1/chat/completions")
        .with_timeout_secs(2);
    let client = OpenAiClient::new(&config).unwrap();
    let err = client.chat("sk", &simple_request()).await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport(_)));
}

#[tokio::test]
async fn session_generate_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer sk-cached"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(WELL_FORMED_REPLY)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = OpenAiClient::new(&config).unwrap();
    let session = Session::open(
        config,
        Box::new(MemoryCredentialStore::with_entry(
            API_KEY_STORAGE_KEY,
            "sk-cached",
        )),
    );

    let content = session.generate(&client, "Cell Biology").await.unwrap();
    let s = &content.sections;
    assert_eq!(s.objective, "Understand cell biology.");
    assert_eq!(s.syllabus, "1. Cells\n2. DNA");
    assert_eq!(s.knowledge, "Name the organelles.");
    assert_eq!(s.comprehension, "Explain mitosis.");
    assert_eq!(s.application, "Use a microscope.");
    assert_eq!(s.assessments, "- Lab report");
    assert_eq!(s.readings, "- Alberts, Molecular Biology of the Cell");
}

#[tokio::test]
async fn session_validation_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = OpenAiClient::new(&config).unwrap();
    let session = Session::open(
        config,
        Box::new(MemoryCredentialStore::with_entry(API_KEY_STORAGE_KEY, "sk")),
    );

    let err = session.generate(&client, "AI").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Course title must be at least 3 characters long"
    );
}
