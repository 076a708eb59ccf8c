pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Largest accepted resume upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/analyze/full", post(handlers::handle_analyze_full))
        .route(
            "/analyze/upload",
            post(handlers::handle_analyze_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::prompts::SKILLS_SYSTEM;
    use crate::llm_client::stub::StubProvider;
    use crate::llm_client::LlmError;

    fn router_with(stub: &Arc<StubProvider>) -> Router {
        build_router(AppState { llm: stub.clone() })
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, Value) {
        post_json_to(app, "/analyze", body).await
    }

    async fn post_json_to(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn multipart_request(field: &str, content: &[u8]) -> Request<Body> {
        let boundary = "skills-test-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_resume_text_is_400() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let (status, body) = post_json(router_with(&stub), "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Resume text required" }));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_and_null_resume_text_are_400() {
        for payload in [r#"{"resumeText": ""}"#, r#"{"resumeText": null}"#] {
            let stub = Arc::new(StubProvider::replying("unused"));
            let (status, body) = post_json(router_with(&stub), payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert_eq!(body["error"], "Resume text required");
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_with_error_field() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let (status, body) = post_json(router_with(&stub), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_success_returns_skills() {
        let stub = Arc::new(StubProvider::replying("Python, SQL"));
        let (status, body) = post_json(
            router_with(&stub),
            r#"{"resumeText": "Backend engineer at Acme"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "skills": "Python, SQL" }));

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[0][0].role, "system");
        assert_eq!(calls[0][0].content, SKILLS_SYSTEM);
        assert_eq!(calls[0][1].role, "user");
        assert_eq!(calls[0][1].content, "Backend engineer at Acme");
    }

    #[tokio::test]
    async fn test_provider_failure_is_500_with_message() {
        let stub = Arc::new(StubProvider::failing(|| LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        }));
        let (status, body) =
            post_json(router_with(&stub), r#"{"resumeText": "Backend engineer"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_sequential_requests_are_independent() {
        let stub = Arc::new(StubProvider::replying("Rust"));
        let app = router_with(&stub);

        let (first, _) = post_json(app.clone(), r#"{"resumeText": "first resume"}"#).await;
        let (second, _) = post_json(app, r#"{"resumeText": "second resume"}"#).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[1].len(), 2);
        assert_eq!(calls[0][1].content, "first resume");
        assert_eq!(calls[1][1].content, "second resume");
    }

    #[tokio::test]
    async fn test_full_analysis_returns_structured_json() {
        let stub = Arc::new(StubProvider::replying(
            r#"{"skills":["Rust"],"summary":"Systems engineer","experienceHighlights":[],"education":["MSc"],"overallImpression":"Solid"}"#,
        ));
        let (status, body) = post_json_to(
            router_with(&stub),
            "/analyze/full",
            r#"{"resumeText": "Systems engineer, 8 years of Rust"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "skills": ["Rust"],
                "summary": "Systems engineer",
                "experienceHighlights": [],
                "education": ["MSc"],
                "overallImpression": "Solid"
            })
        );
    }

    #[tokio::test]
    async fn test_full_analysis_with_unparseable_reply_is_500() {
        let stub = Arc::new(StubProvider::replying("not json at all"));
        let (status, body) = post_json_to(
            router_with(&stub),
            "/analyze/full",
            r#"{"resumeText": "Systems engineer"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Error processing AI response. Could not parse analysis data."
        );
    }

    #[tokio::test]
    async fn test_full_analysis_missing_text_is_400() {
        let stub = Arc::new(StubProvider::replying("{}"));
        let (status, body) = post_json_to(router_with(&stub), "/analyze/full", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Resume text required");
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_400() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let (status, body) = send(
            router_with(&stub),
            multipart_request("attachment", b"%PDF-1.4"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[tokio::test]
    async fn test_upload_of_non_pdf_is_400() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let (status, body) = send(
            router_with(&stub),
            multipart_request("resume", b"just some text"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Could not read PDF"));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let stub = Arc::new(StubProvider::replying("unused"));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router_with(&stub), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "skills-api");
        assert_eq!(body["model"], "gpt-4");
    }
}
