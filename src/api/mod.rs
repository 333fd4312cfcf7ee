//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Wizard navigation
        .route("/level", post(level_handler))
        .route("/method", post(method_handler))
        .route("/next", post(next_handler))
        .route("/back", post(back_handler))
        // Timer controls
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/restart", post(restart_handler))
        .route("/timer/test", post(test_handler))
        .route("/language", get(get_language_handler).put(set_language_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::app_state::tests::test_state;

    async fn call(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = test_state("api-health");
        let router = create_router(state);
        let (status, body) = call(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_wizard_to_timer() {
        let (state, _) = test_state("api-wizard");
        let router = create_router(state);

        let (_, body) = call(&router, Method::POST, "/level", Some(json!({"level": "MEDIUM"}))).await;
        assert_eq!(body["session"]["level"], "MEDIUM");

        call(&router, Method::POST, "/next", None).await;
        call(&router, Method::POST, "/method", Some(json!({"method": "COLD_WATER"}))).await;
        let (status, body) = call(&router, Method::POST, "/next", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["session"]["screen"], "TIMER");
        assert_eq!(body["session"]["timer"]["remaining_seconds"], 720);
        assert_eq!(body["session"]["clock"], "12:00");
        assert_eq!(body["session"]["control"], "START");
    }

    #[tokio::test]
    async fn test_timer_control_off_timer_screen_is_reported() {
        let (state, _) = test_state("api-conflict");
        let router = create_router(state);

        let (status, body) = call(&router, Method::POST, "/timer/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert_eq!(body["session"]["screen"], "LEVEL_SELECT");
        assert!(body["session"]["timer"].is_null());
    }

    #[tokio::test]
    async fn test_toggle_and_status_labels() {
        let (state, _) = test_state("api-toggle");
        let router = create_router(state);
        call(&router, Method::POST, "/next", None).await;
        call(&router, Method::POST, "/next", None).await;

        let (_, body) = call(&router, Method::POST, "/timer/toggle", None).await;
        assert_eq!(body["session"]["timer"]["is_running"], true);
        assert_eq!(body["session"]["control"], "PAUSE");

        let (_, body) = call(&router, Method::GET, "/status", None).await;
        assert_eq!(body["labels"]["language"], "TURKISH");
        assert_eq!(body["labels"]["control"], "Duraklat");
        assert_eq!(body["labels"]["level_name"], "Rafadan");
        assert_eq!(body["labels"]["total_time"], "Toplam süre: 5 dakika");
        assert_eq!(body["labels"]["test"], "Test (3 sn)");
        assert_eq!(body["labels"]["dial"], "Yumurta");
        assert_eq!(body["labels"]["back"], "Geri");
        assert!(body["labels"]["question"].is_null());
        assert_eq!(body["last_action"], "toggle");

        let (_, body) = call(&router, Method::POST, "/timer/pause", None).await;
        assert_eq!(body["session"]["timer"]["is_running"], false);
        assert_eq!(body["session"]["control"], "START");
    }

    #[tokio::test]
    async fn test_test_mode_endpoint() {
        let (state, _) = test_state("api-test-mode");
        let router = create_router(state);
        call(&router, Method::POST, "/next", None).await;
        call(&router, Method::POST, "/next", None).await;

        let (_, body) = call(&router, Method::POST, "/timer/test", None).await;
        let timer = &body["session"]["timer"];
        assert_eq!(timer["total_seconds"], 3);
        assert_eq!(timer["remaining_seconds"], 3);
        assert_eq!(timer["test_mode"], true);
    }

    #[tokio::test]
    async fn test_method_screen_status_labels() {
        let (state, _) = test_state("api-method-labels");
        let router = create_router(state);
        call(&router, Method::POST, "/level", Some(json!({"level": "HARD"}))).await;
        call(&router, Method::POST, "/next", None).await;

        let (_, body) = call(&router, Method::GET, "/status", None).await;
        let labels = &body["labels"];
        assert_eq!(labels["question"], "Pişirme yönteminizi seçin");
        assert_eq!(labels["selected"], "Seçilen: Sert");
        assert_eq!(labels["next"], "Başla");
        assert_eq!(labels["back"], "Geri");
        assert!(labels["control"].is_null());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_status_labels() {
        let (state, _) = test_state("api-ready-labels");
        state.set_language(crate::cooking::Language::English).unwrap();
        let router = create_router(state);
        call(&router, Method::POST, "/next", None).await;
        call(&router, Method::POST, "/next", None).await;
        call(&router, Method::POST, "/timer/test", None).await;

        tokio::time::sleep(std::time::Duration::from_millis(3_500)).await;
        let (_, body) = call(&router, Method::GET, "/status", None).await;
        let labels = &body["labels"];
        assert_eq!(body["session"]["timer"]["alarm_active"], true);
        assert_eq!(labels["dial"], "Ready!");
        assert_eq!(labels["ready"], "Egg is ready!");
        assert_eq!(labels["ready_subtitle"], "Enjoy your meal!");
        assert_eq!(labels["control"], "Restart");
    }

    #[tokio::test]
    async fn test_language_is_persisted() {
        let (state, _) = test_state("api-language");
        let router = create_router(state.clone());

        let (_, body) = call(&router, Method::GET, "/language", None).await;
        assert_eq!(body["language"], "TURKISH");

        let (status, body) =
            call(&router, Method::PUT, "/language", Some(json!({"language": "ENGLISH"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "English");

        let (_, body) = call(&router, Method::GET, "/status", None).await;
        assert_eq!(body["labels"]["app_title"], "Egg Timer");
        assert_eq!(body["labels"]["level_name"], "Soft-boiled");
        assert_eq!(body["labels"]["question"], "How would you like your egg cooked?");
        assert_eq!(body["labels"]["next"], "Continue");
        assert!(body["labels"]["test"].is_null());
    }
}
