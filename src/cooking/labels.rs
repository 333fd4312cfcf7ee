//! Localized display text for levels, methods and timer controls

use serde::{Deserialize, Serialize};

use super::{CookingMethod, DonenessLevel};
use crate::state::ControlAction;

/// UI language, persisted as a user preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Turkish,
    English,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::Turkish => "Türkçe",
            Language::English => "English",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Turkish
    }
}

impl DonenessLevel {
    pub fn display_name(self, language: Language) -> &'static str {
        match (self, language) {
            (DonenessLevel::Soft, Language::Turkish) => "Rafadan",
            (DonenessLevel::Soft, Language::English) => "Soft-boiled",
            (DonenessLevel::Medium, Language::Turkish) => "Kayısı",
            (DonenessLevel::Medium, Language::English) => "Medium",
            (DonenessLevel::Hard, Language::Turkish) => "Sert",
            (DonenessLevel::Hard, Language::English) => "Hard-boiled",
        }
    }

    pub fn description(self, language: Language) -> &'static str {
        match (self, language) {
            (DonenessLevel::Soft, Language::Turkish) => "Akışkan sarı",
            (DonenessLevel::Soft, Language::English) => "Runny yolk",
            (DonenessLevel::Medium, Language::Turkish) => "Kremamsı sarı",
            (DonenessLevel::Medium, Language::English) => "Jammy yolk",
            (DonenessLevel::Hard, Language::Turkish) => "Tam pişmiş",
            (DonenessLevel::Hard, Language::English) => "Fully cooked",
        }
    }
}

impl CookingMethod {
    pub fn display_name(self, language: Language) -> &'static str {
        match (self, language) {
            (CookingMethod::BoilingWater, Language::Turkish) => "Kaynar Suya At",
            (CookingMethod::BoilingWater, Language::English) => "Drop into boiling water",
            (CookingMethod::ColdWater, Language::Turkish) => "Suyla Beraber Kaynat",
            (CookingMethod::ColdWater, Language::English) => "Start with cold water",
        }
    }

    pub fn description(self, language: Language) -> &'static str {
        match (self, language) {
            (CookingMethod::BoilingWater, Language::Turkish) => {
                "Su kaynadıktan sonra yumurtayı atın"
            }
            (CookingMethod::BoilingWater, Language::English) => "Add the egg after the water boils",
            (CookingMethod::ColdWater, Language::Turkish) => "Soğuk suyla beraber başlayın",
            (CookingMethod::ColdWater, Language::English) => {
                "Begin heating with the egg in cold water"
            }
        }
    }
}

impl ControlAction {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (ControlAction::Start, Language::Turkish) => "Başla",
            (ControlAction::Start, Language::English) => "Start",
            (ControlAction::Pause, Language::Turkish) => "Duraklat",
            (ControlAction::Pause, Language::English) => "Pause",
            (ControlAction::Restart, Language::Turkish) => "Tekrar",
            (ControlAction::Restart, Language::English) => "Restart",
        }
    }
}

/// Fixed wizard text that does not depend on a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLabel {
    AppTitle,
    LevelQuestion,
    MethodQuestion,
    Continue,
    Back,
    Selected,
    ReadySubtitle,
    /// Dial caption once the countdown reaches zero
    Ready,
    /// Dial caption while time remains
    Egg,
}

impl UiLabel {
    pub fn text(self, language: Language) -> &'static str {
        match (self, language) {
            (UiLabel::AppTitle, Language::Turkish) => "Yumurta Zamanlayıcısı",
            (UiLabel::AppTitle, Language::English) => "Egg Timer",
            (UiLabel::LevelQuestion, Language::Turkish) => {
                "Yumurtanızı nasıl pişirmek istiyorsunuz?"
            }
            (UiLabel::LevelQuestion, Language::English) => "How would you like your egg cooked?",
            (UiLabel::MethodQuestion, Language::Turkish) => "Pişirme yönteminizi seçin",
            (UiLabel::MethodQuestion, Language::English) => "Choose your cooking method",
            (UiLabel::Continue, Language::Turkish) => "Devam Et",
            (UiLabel::Continue, Language::English) => "Continue",
            (UiLabel::Back, Language::Turkish) => "Geri",
            (UiLabel::Back, Language::English) => "Back",
            (UiLabel::Selected, Language::Turkish) => "Seçilen",
            (UiLabel::Selected, Language::English) => "Selected",
            (UiLabel::ReadySubtitle, Language::Turkish) => "Afiyet olsun!",
            (UiLabel::ReadySubtitle, Language::English) => "Enjoy your meal!",
            (UiLabel::Ready, Language::Turkish) => "Hazır!",
            (UiLabel::Ready, Language::English) => "Ready!",
            (UiLabel::Egg, Language::Turkish) => "Yumurta",
            (UiLabel::Egg, Language::English) => "Egg",
        }
    }
}

/// "Selected: <level>" line on the method screen
pub fn selected_label(language: Language, level: DonenessLevel) -> String {
    format!("{}: {}", UiLabel::Selected.text(language), level.display_name(language))
}

/// Label for the 3-second test control
pub fn test_label(language: Language) -> &'static str {
    match language {
        Language::Turkish => "Test (3 sn)",
        Language::English => "Test (3s)",
    }
}

/// Headline shown once the alarm fires
pub fn ready_title(language: Language) -> &'static str {
    match language {
        Language::Turkish => "Yumurta hazır!",
        Language::English => "Egg is ready!",
    }
}

pub fn total_time_label(language: Language, total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    match language {
        Language::Turkish => format!("Toplam süre: {} dakika", minutes),
        Language::English => format!("Total time: {} min", minutes),
    }
}

/// Format seconds as "m:ss" (minutes unpadded)
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
