//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    cooking::{
        labels::{ready_title, selected_label, test_label, total_time_label, UiLabel},
        CookingMethod, DonenessLevel, Language,
    },
    state::{ControlAction, Screen, SessionSnapshot},
};

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    pub fn ok(message: String, session: SessionSnapshot) -> Self {
        Self::new("ok".to_string(), message, session)
    }

    /// Create an error response
    pub fn error(message: String, session: SessionSnapshot) -> Self {
        Self::new("error".to_string(), message, session)
    }
}

/// Text a client shows for the current screen in the selected language.
///
/// Fields that belong to other screens are left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsResponse {
    pub language: Language,
    pub app_title: String,
    pub level_name: String,
    pub level_description: String,
    pub method_name: String,
    pub method_description: String,
    /// Prompt of a selection screen
    pub question: Option<String>,
    /// Chosen level, shown on the method screen
    pub selected: Option<String>,
    /// Forward button of a selection screen
    pub next: Option<String>,
    pub back: Option<String>,
    pub total_time: Option<String>,
    pub control: Option<String>,
    pub test: Option<String>,
    /// Caption under the dial
    pub dial: Option<String>,
    /// Present only while the alarm is active
    pub ready: Option<String>,
    pub ready_subtitle: Option<String>,
}

impl LabelsResponse {
    pub fn for_session(session: &SessionSnapshot, language: Language) -> Self {
        let text = |label: UiLabel| Some(label.text(language).to_string());
        let timer = session.timer.as_ref().filter(|_| session.screen == Screen::Timer);
        let alarm = timer.filter(|t| t.alarm_active).is_some();

        let (question, next) = match session.screen {
            Screen::LevelSelect => (text(UiLabel::LevelQuestion), text(UiLabel::Continue)),
            Screen::MethodSelect => (
                text(UiLabel::MethodQuestion),
                Some(ControlAction::Start.label(language).to_string()),
            ),
            Screen::Timer => (None, None),
        };

        Self {
            language,
            app_title: UiLabel::AppTitle.text(language).to_string(),
            level_name: session.level.display_name(language).to_string(),
            level_description: session.level.description(language).to_string(),
            method_name: session.method.display_name(language).to_string(),
            method_description: session.method.description(language).to_string(),
            question,
            selected: (session.screen == Screen::MethodSelect)
                .then(|| selected_label(language, session.level)),
            next,
            back: (session.screen != Screen::LevelSelect)
                .then(|| UiLabel::Back.text(language).to_string()),
            total_time: timer.map(|t| total_time_label(language, t.total_seconds)),
            control: timer.map(|t| t.control().label(language).to_string()),
            test: timer.map(|_| test_label(language).to_string()),
            dial: timer.map(|t| {
                let label = if t.remaining_seconds == 0 { UiLabel::Ready } else { UiLabel::Egg };
                label.text(language).to_string()
            }),
            ready: alarm.then(|| ready_title(language).to_string()),
            ready_subtitle: if alarm { text(UiLabel::ReadySubtitle) } else { None },
        }
    }
}

/// Status response with session, labels and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub labels: LabelsResponse,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub language: Language,
    pub label: String,
}

impl LanguageResponse {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            label: language.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelRequest {
    pub level: DonenessLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MethodRequest {
    pub method: CookingMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
