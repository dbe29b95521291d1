use tracing::warn;

use crate::config::MealDistribution;
use crate::models::{ActivityLevel, DailyMacros, Goal, Meal, Sex, UserProfile};
use crate::planner::constants::*;

/// Per-meal calorie targets for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealTargets {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
}

impl MealTargets {
    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner
    }

    /// Targets paired with the meal names, in serving order.
    pub fn named(&self) -> [(&'static str, f64); 3] {
        [
            (BREAKFAST, self.breakfast),
            (LUNCH, self.lunch),
            (DINNER, self.dinner),
        ]
    }
}

/// Share of energy coming from each macronutrient, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacroPercentages {
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub carbs_pct: f64,
}

/// Round to one decimal place.
#[inline]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Basal metabolic rate via Mifflin-St Jeor.
///
/// `10 * weight_kg + 6.25 * height_cm - 5 * age`, then `+5` for men and
/// `-161` for women. No clamping; ranges are enforced by `UserProfile::validate`.
pub fn calculate_bmr(profile: &UserProfile) -> f64 {
    let base = BMR_WEIGHT_FACTOR * profile.weight_kg + BMR_HEIGHT_FACTOR * profile.height_cm
        - BMR_AGE_FACTOR * profile.age as f64;
    match profile.sex {
        Sex::Male => base + BMR_MALE_OFFSET,
        Sex::Female => base + BMR_FEMALE_OFFSET,
    }
}

pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => SEDENTARY_MULT,
        ActivityLevel::LightlyActive => LIGHTLY_ACTIVE_MULT,
        ActivityLevel::ModeratelyActive => MODERATELY_ACTIVE_MULT,
        ActivityLevel::VeryActive => VERY_ACTIVE_MULT,
        ActivityLevel::ExtraActive => EXTRA_ACTIVE_MULT,
    }
}

/// Total daily energy expenditure.
pub fn calculate_tdee(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * activity_multiplier(level)
}

pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::LoseWeight => LOSE_WEIGHT_ADJUSTMENT,
        Goal::Maintain => MAINTAIN_ADJUSTMENT,
        Goal::GainWeight => GAIN_WEIGHT_ADJUSTMENT,
    }
}

/// Daily calorie target: TDEE plus the goal adjustment.
pub fn calculate_daily_target(tdee: f64, goal: Goal) -> f64 {
    tdee + goal_adjustment(goal)
}

/// Split the daily target across breakfast, lunch and dinner.
///
/// A distribution that does not sum to 1.0 is logged and applied as-is.
pub fn split_meal_targets(daily_target: f64, dist: &MealDistribution) -> MealTargets {
    if !dist.is_balanced() {
        warn!(
            "Meal distribution {:.3}/{:.3}/{:.3} sums to {:.4}, not 1.0",
            dist.breakfast,
            dist.lunch,
            dist.dinner,
            dist.total()
        );
    }

    MealTargets {
        breakfast: daily_target * dist.breakfast,
        lunch: daily_target * dist.lunch,
        dinner: daily_target * dist.dinner,
    }
}

/// Percentage of `total_kcal` contributed by each macro, one decimal.
///
/// Returns all zeros when `total_kcal <= 0`.
pub fn macro_percentages(total_kcal: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> MacroPercentages {
    if total_kcal <= 0.0 {
        return MacroPercentages::default();
    }

    let pct = |grams: f64, density: f64| round1(grams * density / total_kcal * 100.0);
    MacroPercentages {
        protein_pct: pct(protein_g, KCAL_PER_G_PROTEIN),
        fat_pct: pct(fat_g, KCAL_PER_G_FAT),
        carbs_pct: pct(carbs_g, KCAL_PER_G_CARBS),
    }
}

/// Sum every item's calories and macros across all meals.
///
/// Missing macro values count as zero.
pub fn aggregate_daily_macros(meals: &[Meal]) -> DailyMacros {
    let mut totals = DailyMacros::default();
    for item in meals.iter().flat_map(|m| m.items.iter()) {
        totals.total_calories += item.calories;
        totals.total_protein += item.macros.protein.unwrap_or(0.0);
        totals.total_fat += item.macros.fat.unwrap_or(0.0);
        totals.total_carbs += item.macros.carbs.unwrap_or(0.0);
        totals.total_sugar += item.macros.sugar.unwrap_or(0.0);
        totals.total_salt += item.macros.salt.unwrap_or(0.0);
    }

    let pct = macro_percentages(
        totals.total_calories,
        totals.total_protein,
        totals.total_fat,
        totals.total_carbs,
    );
    totals.protein_pct = pct.protein_pct;
    totals.fat_pct = pct.fat_pct;
    totals.carbs_pct = pct.carbs_pct;
    totals
}
