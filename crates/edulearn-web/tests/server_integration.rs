//! Integration tests for the edulearn-web server.
//!
//! These tests start a real axum server on a random port, point it at a
//! wiremock chat-completion endpoint and exercise the HTTP API.

use edulearn::config::{APP_TITLE, CourseConfig, DISCLAIMER};
use edulearn_web::{WebConfig, spawn_web};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHAT_PATH: &str = "/v1/chat/completions";

/// Helper: spawn a test server on port 0 whose model calls go to `upstream`.
async fn spawn_test_server(upstream: &MockServer) -> String {
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        course: CourseConfig::default()
            .with_api_base_url(format!("{}{CHAT_PATH}", upstream.uri()))
            .with_timeout_secs(5),
    };
    let addr = spawn_web(config).await.unwrap();
    format!("http://{addr}")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

fn post_generate(base: &str, body: serde_json::Value) -> reqwest::RequestBuilder {
    reqwest::Client::new()
        .post(format!("{base}/api/generate"))
        .json(&body)
}

// ── Static routes ────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_form_page() {
    let upstream = MockServer::start().await;
    let base = spawn_test_server(&upstream).await;

    let resp = reqwest::get(format!("{base}/")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = resp.text().await.unwrap();
    assert!(html.contains("id=\"course-title\""));
    assert!(html.contains("openai_api_key"));
}

#[tokio::test]
async fn info_reports_page_texts_and_model() {
    let upstream = MockServer::start().await;
    let base = spawn_test_server(&upstream).await;

    let resp = reqwest::get(format!("{base}/api/info")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["title"], APP_TITLE);
    assert_eq!(json["disclaimer"], DISCLAIMER);
    assert_eq!(json["model"], "gpt-3.5-turbo");
}

// ── Generate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_returns_sections_html_and_copy_texts() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", "Bearer sk-browser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "COURSE_OBJECTIVE: Learn tides.\nSYLLABUS:\n1. Moon\n2. Sun\n\
             LEARNING_OUTCOMES:\nKNOWLEDGE: Define tide.\nCOMPREHENSION: Explain cycles.\n\
             APPLICATION: Read a tide table.\nASSESSMENTS: Quiz\nREADINGS: Tide Tables",
        )))
        .expect(1)
        .mount(&upstream)
        .await;
    let base = spawn_test_server(&upstream).await;

    let resp = post_generate(
        &base,
        serde_json::json!({ "course_title": "  Oceanography  ", "api_key": "sk-browser" }),
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["title"], "Oceanography");
    assert_eq!(json["sections"]["objective"], "Learn tides.");
    assert_eq!(json["sections"]["readings"], "Tide Tables");
    assert_eq!(json["html"]["objective"], "<p>Learn tides.</p>");
    assert_eq!(json["html"]["syllabus"], "<br>1. Moon<br><br>2. Sun");
    assert_eq!(
        json["copy"]["objective"],
        "Course Objective for \"Oceanography\":\n\nLearn tides."
    );
    assert!(
        json["copy"]["all"]
            .as_str()
            .unwrap()
            .starts_with("Educational Content Package: \"Oceanography\"")
    );
}

#[tokio::test]
async fn generate_rejects_short_title_without_calling_api() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_test_server(&upstream).await;

    let resp = post_generate(
        &base,
        serde_json::json!({ "course_title": "AI", "api_key": "sk" }),
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), 400);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Course title must be at least 3 characters long");
}

#[tokio::test]
async fn generate_checks_title_before_key() {
    let upstream = MockServer::start().await;
    let base = spawn_test_server(&upstream).await;

    let resp = post_generate(&base, serde_json::json!({})).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Please enter a course title");

    let resp = post_generate(&base, serde_json::json!({ "course_title": "Geology" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Please enter your OpenAI API key");
}

#[tokio::test]
async fn generate_passes_api_error_message_through() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": { "message": "Rate limit reached for requests" }
        })))
        .mount(&upstream)
        .await;
    let base = spawn_test_server(&upstream).await;

    let resp = post_generate(
        &base,
        serde_json::json!({ "course_title": "Geology", "api_key": "sk" }),
    )
    .send()
    .await
    .unwrap();
    assert_eq!(resp.status(), 502);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "Rate limit reached for requests");
}

#[tokio::test]
async fn generate_rejects_malformed_bodies_with_error_json() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("unused")))
        .expect(0)
        .mount(&upstream)
        .await;
    let base = spawn_test_server(&upstream).await;
    let client = reqwest::Client::new();
    let url = format!("{base}/api/generate");

    let cases = [
        ("application/json", "{not json"),
        ("text/plain", "{}"),
        ("application/json", r#"{"course_title": 5}"#),
    ];
    for (content_type, body) in cases {
        let resp = client
            .post(&url)
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "{content_type} {body}");

        let json: serde_json::Value = resp.json().await.unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid request: "), "{message}");
    }
}
