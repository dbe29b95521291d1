use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Macro breakdown of a single meal item.
///
/// `None` means the catalog had no value for that nutrient, which is
/// distinct from a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub sugar: Option<f64>,
    pub salt: Option<f64>,
}

impl MacroBreakdown {
    /// Multiply every present value by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |v: Option<f64>| v.map(|x| x * factor);
        Self {
            protein: scale(self.protein),
            fat: scale(self.fat),
            carbs: scale(self.carbs),
            sugar: scale(self.sugar),
            salt: scale(self.salt),
        }
    }

    /// Field-wise sum where a missing side counts as zero.
    /// Stays `None` only when both sides are missing.
    pub fn merged(&self, other: &Self) -> Self {
        let add = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        };
        Self {
            protein: add(self.protein, other.protein),
            fat: add(self.fat, other.fat),
            carbs: add(self.carbs, other.carbs),
            sugar: add(self.sugar, other.sugar),
            salt: add(self.salt, other.salt),
        }
    }
}

/// A resolved portion of a product inside a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub id: String,
    pub name: String,
    /// Serving descriptor, e.g. "150g" or "2 x 50g".
    pub serving: String,
    pub calories: f64,
    pub macros: MacroBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    pub target_calories: f64,
    pub actual_calories: f64,
    pub items: Vec<MealItem>,
}

impl Meal {
    /// An empty meal with the given calorie target.
    pub fn empty(name: impl Into<String>, target_calories: f64) -> Self {
        Self {
            name: name.into(),
            target_calories,
            actual_calories: 0.0,
            items: Vec::new(),
        }
    }

    pub fn item_calories(&self) -> f64 {
        self.items.iter().map(|i| i.calories).sum()
    }

    /// Re-derive `actual_calories` from the items.
    pub fn recompute_total(&mut self) {
        self.actual_calories = self.item_calories();
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Aggregated nutrition for a whole day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMacros {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbs: f64,
    pub total_sugar: f64,
    pub total_salt: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub carbs_pct: f64,
}

/// A full-day plan of three meals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub plan_id: String,
    pub bmr: f64,
    pub tdee: f64,
    pub daily_calorie_target: f64,
    pub meals: Vec<Meal>,
    pub daily_macros: DailyMacros,
    pub flexibility: bool,
    pub optional_products_used: usize,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DailyPlan {
    pub fn meal(&self, name: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.is_named(name))
    }

    /// Position of the first item with `id`, scanning meals in order.
    pub fn locate_item(&self, id: &str) -> Option<(usize, usize)> {
        self.meals.iter().enumerate().find_map(|(mi, meal)| {
            meal.items
                .iter()
                .position(|item| item.id == id)
                .map(|ii| (mi, ii))
        })
    }

    pub fn item_count(&self) -> usize {
        self.meals.iter().map(|m| m.items.len()).sum()
    }
}

/// Kind of change recorded in a customization log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Swap,
    SwapFailed,
    Remove,
    RemoveFailed,
    AddManual,
    AdjustCalories,
    AdjustCaloriesFailed,
}

impl ChangeType {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ChangeType::SwapFailed | ChangeType::RemoveFailed | ChangeType::AdjustCaloriesFailed
        )
    }
}

/// One entry of the audit trail produced by a customization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub change_type: ChangeType,
    pub description: String,
    pub meal: Option<String>,
}

impl ChangeLogEntry {
    pub fn new(change_type: ChangeType, description: impl Into<String>, meal: Option<&str>) -> Self {
        Self {
            change_type,
            description: description.into(),
            meal: meal.map(str::to_string),
        }
    }
}
