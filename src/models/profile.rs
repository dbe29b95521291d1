use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Anything that is not recognisably female is treated as male.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "female" | "f" | "woman" => Sex::Female,
            "male" | "m" | "man" => Sex::Male,
            other => {
                warn!("Unknown sex '{}', defaulting to male", other);
                Sex::Male
            }
        }
    }
}

impl From<String> for Sex {
    fn from(value: String) -> Self {
        Sex::from_name(&value)
    }
}

impl From<Sex> for String {
    fn from(value: Sex) -> Self {
        value.as_str().to_string()
    }
}

/// Physical activity level used to scale BMR into TDEE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Parse an activity level name. Unknown names fall back to sedentary.
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly_active" | "light" => ActivityLevel::LightlyActive,
            "moderately_active" | "moderate" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extra_active" | "extra" => ActivityLevel::ExtraActive,
            other => {
                warn!("Unknown activity level '{}', defaulting to sedentary", other);
                ActivityLevel::Sedentary
            }
        }
    }
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        ActivityLevel::from_name(&value)
    }
}

impl From<ActivityLevel> for String {
    fn from(value: ActivityLevel) -> Self {
        value.as_str().to_string()
    }
}

/// Weight goal driving the daily calorie adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainWeight,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::LoseWeight, Goal::Maintain, Goal::GainWeight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::GainWeight => "gain_weight",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "lose" | "lose_weight" => Goal::LoseWeight,
            "gain" | "gain_weight" => Goal::GainWeight,
            "maintain" => Goal::Maintain,
            other => {
                warn!("Unknown goal '{}', defaulting to maintain", other);
                Goal::Maintain
            }
        }
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        Goal::from_name(&value)
    }
}

impl From<Goal> for String {
    fn from(value: Goal) -> Self {
        value.as_str().to_string()
    }
}

/// Physical profile of the person a plan is generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl UserProfile {
    /// Reject profiles outside the supported anthropometric ranges.
    pub fn validate(&self) -> Result<()> {
        if !(10..=120).contains(&self.age) {
            return Err(PlanError::InvalidProfile(format!(
                "age {} outside 10-120",
                self.age
            )));
        }
        if !(100.0..=250.0).contains(&self.height_cm) {
            return Err(PlanError::InvalidProfile(format!(
                "height {} cm outside 100-250",
                self.height_cm
            )));
        }
        if !(30.0..=300.0).contains(&self.weight_kg) {
            return Err(PlanError::InvalidProfile(format!(
                "weight {} kg outside 30-300",
                self.weight_kg
            )));
        }
        Ok(())
    }
}

/// Dietary restriction tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    /// Carried for information; does not filter.
    Other(String),
}

impl From<String> for DietaryRestriction {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "vegetarian" => DietaryRestriction::Vegetarian,
            "vegan" => DietaryRestriction::Vegan,
            _ => DietaryRestriction::Other(value),
        }
    }
}

impl From<&str> for DietaryRestriction {
    fn from(value: &str) -> Self {
        DietaryRestriction::from(value.to_string())
    }
}

impl From<DietaryRestriction> for String {
    fn from(value: DietaryRestriction) -> Self {
        match value {
            DietaryRestriction::Vegetarian => "vegetarian".to_string(),
            DietaryRestriction::Vegan => "vegan".to_string(),
            DietaryRestriction::Other(tag) => tag,
        }
    }
}

/// Food preferences applied while selecting meal items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Substrings that reject a product when found in its id, brand, or name.
    pub exclude: Vec<String>,

    pub dietary_restrictions: Vec<DietaryRestriction>,

    /// Informational only.
    pub prefer: Vec<String>,
}
