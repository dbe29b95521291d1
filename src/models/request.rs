use serde::{Deserialize, Serialize};

use crate::models::{Meal, MealItem};

/// Replace the first item with `old_id` by the product `new_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    pub old_id: String,
    pub new_id: String,
}

/// Remove the first item matching all given criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveRequest {
    pub id: String,

    #[serde(default)]
    pub meal_name: Option<String>,

    #[serde(default)]
    pub item_index: Option<usize>,
}

impl RemoveRequest {
    /// Three-way match: identifier, optional meal name, optional position.
    pub fn matches(&self, meal: &Meal, index: usize, item: &MealItem) -> bool {
        item.id == self.id
            && self.meal_name.as_deref().is_none_or(|name| meal.is_named(name))
            && self.item_index.is_none_or(|wanted| wanted == index)
    }

    /// First matching `(meal_index, item_index)` across the meals.
    pub fn find_match(&self, meals: &[Meal]) -> Option<(usize, usize)> {
        meals.iter().enumerate().find_map(|(mi, meal)| {
            meal.items
                .iter()
                .enumerate()
                .find(|(ii, item)| self.matches(meal, *ii, item))
                .map(|(ii, _)| (mi, ii))
        })
    }
}

/// A user-entered item that is not necessarily in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualItem {
    pub id: Option<String>,
    pub name: String,
    pub serving: Option<String>,
    pub calories: f64,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
    pub sugar: Option<f64>,
    pub salt: Option<f64>,
}

/// Set a meal's calorie target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustRequest {
    pub meal_name: String,
    pub new_target: f64,
}

/// Set of mutations applied to a plan in fixed order:
/// swap, remove, add_manual, adjust_meal_calories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizationRequest {
    pub swap: Option<SwapRequest>,
    pub remove: Option<RemoveRequest>,
    pub add_manual: Option<ManualItem>,
    pub adjust_meal_calories: Option<AdjustRequest>,
}

impl CustomizationRequest {
    pub fn is_empty(&self) -> bool {
        self.swap.is_none()
            && self.remove.is_none()
            && self.add_manual.is_none()
            && self.adjust_meal_calories.is_none()
    }
}
