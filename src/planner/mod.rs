pub mod builder;
pub mod calculations;
pub mod constants;
pub mod generator;
pub mod preferences;
pub mod serving;

pub use builder::MealBuilder;
pub use calculations::{
    aggregate_daily_macros, calculate_bmr, calculate_daily_target, calculate_tdee,
    macro_percentages, split_meal_targets, MacroPercentages, MealTargets,
};
pub use constants::*;
pub use generator::{build_plan, PlanGenerator};
pub use preferences::matches;
pub use serving::{parse_serving_grams, snapshot_item};
