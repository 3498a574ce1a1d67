pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::form::handlers as form;
use crate::render::handlers as preview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form state
        .route("/api/v1/resume", get(form::handle_get_resume))
        .route("/api/v1/resume/actions", post(form::handle_apply_action))
        .route("/api/v1/resume/reset", post(form::handle_reset))
        .route("/api/v1/session", get(form::handle_get_session))
        .route("/api/v1/session/tab", put(form::handle_set_tab))
        // Preview
        .route("/api/v1/preview", get(preview::handle_preview))
        .route("/api/v1/preview/layout", get(preview::handle_preview_layout))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        .route("/api/v1/export/status", get(export::handle_export_status))
        .route("/api/v1/toasts", get(export::handle_take_toasts))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn test_state() -> AppState {
        AppState::new(Config {
            export_delay: Duration::ZERO,
            ..Config::default()
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["service"], "resumate");
    }

    #[tokio::test]
    async fn test_action_updates_snapshot() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::POST,
            "/api/v1/resume/actions",
            Some(json!({
                "type": "set_field",
                "update": {"section": "personal", "field": "full_name", "value": "Jane Doe"}
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["personal"]["full_name"], "Jane Doe");

        let response = send(&app, Method::GET, "/api/v1/resume", None).await;
        assert_eq!(json_body(response).await["personal"]["full_name"], "Jane Doe");
    }

    #[tokio::test]
    async fn test_out_of_range_action_is_404() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::POST,
            "/api/v1/resume/actions",
            Some(json!({"type": "remove_entry", "section": "education", "index": 7})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_tab_switch_and_reset() {
        let app = build_router(test_state());
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/session/tab",
            Some(json!({"tab": "skills"})),
        )
        .await;
        assert_eq!(json_body(response).await["active_tab"], "skills");

        send(&app, Method::POST, "/api/v1/resume/reset", None).await;
        let session = json_body(send(&app, Method::GET, "/api/v1/session", None).await).await;
        assert_eq!(session["active_tab"], "personal");
        assert_eq!(session["tabs"].as_array().unwrap().len(), 6);
        assert_eq!(session["export"]["state"], "idle");
    }

    #[tokio::test]
    async fn test_preview_endpoints() {
        let app = build_router(test_state());
        send(
            &app,
            Method::POST,
            "/api/v1/resume/actions",
            Some(json!({
                "type": "set_field",
                "update": {"section": "skill", "index": 0, "value": "Rust"}
            })),
        )
        .await;

        let response = send(&app, Method::GET, "/api/v1/preview", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&html).contains("<p>Rust</p>"));

        let layout = json_body(send(&app, Method::GET, "/api/v1/preview/layout", None).await).await;
        assert_eq!(layout["pages"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_export_downloads_pdf_and_raises_toast() {
        let app = build_router(test_state());
        send(
            &app,
            Method::POST,
            "/api/v1/resume/actions",
            Some(json!({
                "type": "set_field",
                "update": {"section": "personal", "field": "full_name", "value": "Jane Doe"}
            })),
        )
        .await;

        let response = send(&app, Method::POST, "/api/v1/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Doe_Resume.pdf\"; filename*=UTF-8''Doe_Resume.pdf"
        );
        let pdf = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let status = json_body(send(&app, Method::GET, "/api/v1/export/status", None).await).await;
        assert_eq!(status["state"], "complete");
        assert_eq!(status["file_name"], "Doe_Resume.pdf");

        let toasts = json_body(send(&app, Method::GET, "/api/v1/toasts", None).await).await;
        assert_eq!(toasts.as_array().unwrap().len(), 1);
        assert_eq!(toasts[0]["title"], "Resume Downloaded");
    }
}
