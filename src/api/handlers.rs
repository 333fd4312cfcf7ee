//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::{AppState, Session};
use super::responses::{
    ApiResponse, HealthResponse, LabelsResponse, LanguageRequest, LanguageResponse,
    LevelRequest, MethodRequest, StatusResponse,
};

/// Run a session action and wrap the outcome in an `ApiResponse`.
/// Actions the current screen does not allow come back as an "error" status
/// with the unchanged session.
fn apply<F, T>(
    state: &AppState,
    action: &str,
    message: &str,
    updater: F,
) -> Result<Json<ApiResponse>, StatusCode>
where
    F: FnOnce(&mut Session) -> Result<T, String>,
{
    match state.update_session(action, updater) {
        Ok(session) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::ok(message.to_string(), session)))
        }
        Err(e) => {
            warn!("{} rejected: {}", action, e);
            match state.get_snapshot() {
                Ok(session) => Ok(Json(ApiResponse::error(e, session))),
                Err(e) => {
                    error!("Failed to get session state: {}", e);
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
    }
}

/// Handle POST /level - Select doneness level
pub async fn level_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LevelRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "level", "Doneness level selected", |session| {
        session.select_level(request.level);
        Ok(())
    })
}

/// Handle POST /method - Select cooking method
pub async fn method_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MethodRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "method", "Cooking method selected", |session| {
        session.select_method(request.method);
        Ok(())
    })
}

/// Handle POST /next - Continue to the next screen
pub async fn next_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "next", "Moved to next screen", Session::next)
}

/// Handle POST /back - Return to the previous screen
pub async fn back_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "back", "Moved to previous screen", Session::back)
}

/// Handle POST /timer/toggle - The Start/Pause control
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "toggle", "Timer toggled", Session::toggle)
}

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "start", "Timer started", Session::start)
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "pause", "Timer paused", Session::pause)
}

/// Handle POST /timer/restart
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "restart", "Timer restarted", Session::restart)
}

/// Handle POST /timer/test - Run the 3-second preview
pub async fn test_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    apply(&state, "test", "Test countdown started", Session::start_test)
}

/// Handle GET /language
pub async fn get_language_handler(State(state): State<Arc<AppState>>) -> Json<LanguageResponse> {
    Json(LanguageResponse::new(state.language()))
}

/// Handle PUT /language - Change and persist the UI language
pub async fn set_language_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, StatusCode> {
    match state.set_language(request.language) {
        Ok(language) => Ok(Json(LanguageResponse::new(language))),
        Err(e) => {
            error!("{}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current session and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = match state.get_snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        labels: LabelsResponse::for_session(&session, state.language()),
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream session snapshots as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();

    // The current snapshot goes out first, then one event per change
    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = Event::default()
            .event("session")
            .json_data(&snapshot)
            .unwrap_or_else(|e| Event::default().event("error").data(e.to_string()));
        Some((Ok(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
