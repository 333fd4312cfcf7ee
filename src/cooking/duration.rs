//! Cooking durations for every doneness level and cooking method

use serde::{Deserialize, Serialize};

/// Fixed countdown used by the "test" control instead of the table
pub const TEST_MODE_SECONDS: u32 = 3;

/// Target yolk firmness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonenessLevel {
    Soft,
    Medium,
    Hard,
}

impl DonenessLevel {
    pub const ALL: [DonenessLevel; 3] = [Self::Soft, Self::Medium, Self::Hard];
}

impl Default for DonenessLevel {
    fn default() -> Self {
        Self::Soft
    }
}

/// How the egg meets the water
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CookingMethod {
    /// Egg goes into water that is already boiling
    BoilingWater,
    /// Egg is heated together with the water from cold
    ColdWater,
}

impl CookingMethod {
    pub const ALL: [CookingMethod; 2] = [Self::BoilingWater, Self::ColdWater];
}

impl Default for CookingMethod {
    fn default() -> Self {
        Self::BoilingWater
    }
}

/// Total cooking time in whole seconds
pub fn total_seconds(level: DonenessLevel, method: CookingMethod) -> u32 {
    let minutes = match (method, level) {
        (CookingMethod::BoilingWater, DonenessLevel::Soft) => 5,
        (CookingMethod::BoilingWater, DonenessLevel::Medium) => 7,
        (CookingMethod::BoilingWater, DonenessLevel::Hard) => 10,
        (CookingMethod::ColdWater, DonenessLevel::Soft) => 9,
        (CookingMethod::ColdWater, DonenessLevel::Medium) => 12,
        (CookingMethod::ColdWater, DonenessLevel::Hard) => 15,
    };
    minutes * 60
}
