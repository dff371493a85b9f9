pub mod health;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::session::handlers as sessions;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
/// The single-page web UI.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id/history",
            get(sessions::handle_get_history).delete(sessions::handle_clear_history),
        )
        .route(
            "/api/v1/sessions/:id/report",
            get(sessions::handle_download_report),
        )
        // Analysis API
        .route(
            "/api/v1/sessions/:id/analyze",
            post(analysis::handle_analyze),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::llm_client::{ChatMessage, ChatModel, LlmError};
    use crate::session::SessionStore;
    use crate::weather::test_support::client_for;

    struct CannedModel;

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
            Ok("### Weather Analysis for New York\nWarm and humid.\n```plaintext\nFERTILIZERS:\n```".to_string())
        }
    }

    fn app_for(server: &MockServer) -> Router {
        build_router(AppState {
            weather: client_for(server),
            llm: Arc::new(CannedModel),
            sessions: SessionStore::default(),
        })
    }

    async fn mount_upstreams(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "OK",
                "results": [{"geometry": {"location": {"lat": 40.7128, "lng": -74.006}}}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "weather": [{"description": "few clouds"}],
                "main": {"temp": 24.5, "feels_like": 25.1, "humidity": 80},
                "wind": {"speed": 2.6}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hourly": {"soil_moisture_0_1cm": [0.287]}
            })))
            .mount(server)
            .await;
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(request.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn new_session(app: &Router) -> String {
        let response = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let response = send(&app_for(&server), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let server = MockServer::start().await;
        let response = send(&app_for(&server), "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[test]
    fn test_index_caps_markdown_heading_level() {
        assert!(INDEX_HTML.contains("Math.min(heading[1].length + 1, 6)"));
        assert!(!INDEX_HTML.contains("<h${heading[1].length + 1}>"));
    }

    #[tokio::test]
    async fn test_blank_location_is_rejected() {
        let server = MockServer::start().await;
        let app = app_for(&server);
        let id = new_session(&app).await;

        let response = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/analyze"),
            Some(json!({"location": "   "})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please enter a location.");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let server = MockServer::start().await;
        let response = send(
            &app_for(&server),
            "GET",
            &format!("/api/v1/sessions/{}/history", Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_history_report_and_clear() {
        let server = MockServer::start().await;
        mount_upstreams(&server).await;
        let app = app_for(&server);
        let id = new_session(&app).await;

        let response = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/analyze"),
            Some(json!({"location": "New York"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["location"], "New York");
        assert_eq!(body["weather"]["description"], "Few clouds");
        assert_eq!(body["weather"]["humidity_pct"], 80);
        assert_eq!(body["soil"]["status"], "measured");
        assert!(body["weather_info"]
            .as_str()
            .unwrap()
            .starts_with("Weather at coordinates (40.7128, -74.006):"));
        assert_eq!(body["blocks"].as_array().unwrap().len(), 2);

        let history = json_body(
            send(&app, "GET", &format!("/api/v1/sessions/{id}/history"), None).await,
        )
        .await;
        let entries = history["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["role"], "human");
        assert_eq!(entries[0]["content"], "Analyze weather for New York");
        assert_eq!(entries[1]["role"], "assistant");
        assert_eq!(entries[1]["blocks"][1]["kind"], "code");

        let report = send(&app, "GET", &format!("/api/v1/sessions/{id}/report"), None).await;
        assert_eq!(report.status(), StatusCode::OK);
        let disposition = report.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("filename=\"weather_analysis_New_York_"));
        let text = to_bytes(report.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&text).starts_with("### Weather Analysis for New York"));

        let cleared = send(&app, "DELETE", &format!("/api/v1/sessions/{id}/history"), None).await;
        assert_eq!(cleared.status(), StatusCode::NO_CONTENT);

        let history = json_body(
            send(&app, "GET", &format!("/api/v1/sessions/{id}/history"), None).await,
        )
        .await;
        assert!(history["entries"].as_array().unwrap().is_empty());

        let report = send(&app, "GET", &format!("/api/v1/sessions/{id}/report"), None).await;
        assert_eq!(report.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_analysis_records_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ZERO_RESULTS",
                "results": []
            })))
            .mount(&server)
            .await;
        let app = app_for(&server);
        let id = new_session(&app).await;

        let response = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/analyze"),
            Some(json!({"location": "Nowhere-at-all"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "GEOCODING_ERROR");

        let history = json_body(
            send(&app, "GET", &format!("/api/v1/sessions/{id}/history"), None).await,
        )
        .await;
        assert!(history["entries"].as_array().unwrap().is_empty());
    }
}
