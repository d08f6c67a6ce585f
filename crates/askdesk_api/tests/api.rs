use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use askdesk_api::{
    ApiError, ChatService, ClientSettings, EvalStatusKind, ReqwestService, Source,
};

async fn service_for(server: &MockServer) -> ReqwestService {
    let settings = ClientSettings::with_base_url(format!("{}/api/v1", server.uri()));
    ReqwestService::new(settings).expect("client builds")
}

#[tokio::test]
async fn chat_sends_question_and_decodes_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .and(body_json(json!({"question": "when is the deadline?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "when is the deadline?",
            "answer": "Friday.",
            "sources": [{"title": "Notice 42", "url": "https://example.com/notice/42"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let reply = service
        .send_chat("when is the deadline?")
        .await
        .expect("chat ok");

    assert_eq!(reply.answer, "Friday.");
    assert_eq!(
        reply.sources,
        vec![Source {
            title: "Notice 42".to_string(),
            url: "https://example.com/notice/42".to_string(),
        }]
    );
    assert_eq!(reply.question.as_deref(), Some("when is the deadline?"));
}

#[tokio::test]
async fn chat_reply_without_sources_decodes_to_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Yes."})))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let reply = service.send_chat("open today?").await.expect("chat ok");

    assert_eq!(reply.answer, "Yes.");
    assert!(reply.sources.is_empty());
}

#[tokio::test]
async fn chat_surfaces_detail_from_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db down"})))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let err = service.send_chat("anything?").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            code: 500,
            detail: Some("db down".to_string()),
        }
    );
    assert!(err.to_string().contains("db down"));
}

#[tokio::test]
async fn chat_tolerates_error_body_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let err = service.send_chat("anything?").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            code: 503,
            detail: None,
        }
    );
    assert!(err.to_string().contains("server error"));
}

#[tokio::test]
async fn chat_rejects_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let err = service.send_chat("anything?").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_host_maps_to_transport_error() {
    // Port 9 (discard) is not listening in the test environment.
    let settings = ClientSettings::with_base_url("http://127.0.0.1:9/api/v1");
    let service = ReqwestService::new(settings).expect("client builds");

    let err = service.send_chat("anything?").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn start_evaluation_posts_without_body_and_decodes_ack() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/evaluate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "evaluation started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let ack = service.start_evaluation().await.expect("start ok");

    assert_eq!(ack.message, "evaluation started");
}

#[tokio::test]
async fn status_decodes_running_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluate/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "running",
            "message": "evaluation in progress",
        })))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let doc = service.evaluation_status().await.expect("status ok");

    assert_eq!(doc.status, EvalStatusKind::Running);
    assert_eq!(doc.message.as_deref(), Some("evaluation in progress"));
    assert!(doc.result.is_none());
}

#[tokio::test]
async fn status_decodes_completed_document_with_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluate/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "result": {"accuracy": 0.9},
        })))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let doc = service.evaluation_status().await.expect("status ok");

    assert_eq!(doc.status, EvalStatusKind::Completed);
    assert_eq!(doc.result, Some(json!({"accuracy": 0.9})));
}

#[tokio::test]
async fn status_decodes_idle_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluate/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "idle",
            "message": "no evaluation has been run",
        })))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let doc = service.evaluation_status().await.expect("status ok");

    assert_eq!(doc.status, EvalStatusKind::Idle);
}

#[tokio::test]
async fn unrecognized_status_value_maps_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/evaluate/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "paused"})))
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let doc = service.evaluation_status().await.expect("status ok");

    assert_eq!(doc.status, EvalStatusKind::Unknown);
}

#[tokio::test]
async fn health_probes_the_host_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    service.health().await.expect("health ok");
}
