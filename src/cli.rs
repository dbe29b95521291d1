use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::{PlanError, Result};
use crate::models::{
    ActivityLevel, AdjustRequest, CustomizationRequest, DietaryRestriction, Goal, ManualItem,
    Preferences, RemoveRequest, Sex, SwapRequest, UserProfile,
};

/// Daily meal plan generation and customization from energy-expenditure modeling.
#[derive(Parser, Debug)]
#[command(name = "nutriplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Product catalog file (.json or .csv).
    #[arg(short, long, global = true, default_value = "products.json")]
    pub catalog: PathBuf,

    /// Directory holding saved plans.
    #[arg(short, long, global = true, default_value = "plans")]
    pub store: PathBuf,

    /// Planner configuration file (JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a daily meal plan for a profile.
    Plan(PlanArgs),

    /// Apply swap/remove/add/adjust changes to a saved plan.
    Customize(CustomizeArgs),

    /// Display a saved plan.
    Show {
        /// Plan identifier.
        plan_id: String,
    },
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Collect the profile and preferences interactively.
    #[arg(short, long)]
    pub interactive: bool,

    /// Age in years.
    #[arg(long, required_unless_present = "interactive")]
    pub age: Option<u32>,

    /// male or female.
    #[arg(long, required_unless_present = "interactive")]
    pub sex: Option<String>,

    /// Height in centimeters.
    #[arg(long, required_unless_present = "interactive")]
    pub height: Option<f64>,

    /// Weight in kilograms.
    #[arg(long, required_unless_present = "interactive")]
    pub weight: Option<f64>,

    /// sedentary, lightly_active, moderately_active, very_active or extra_active.
    #[arg(long, default_value = "sedentary")]
    pub activity: String,

    /// lose_weight, maintain or gain_weight.
    #[arg(long, default_value = "maintain")]
    pub goal: String,

    /// Reject products whose id, brand or name contains this text.
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Dietary restriction tag, e.g. vegetarian or vegan.
    #[arg(long)]
    pub restriction: Vec<String>,

    /// Preferred product (informational).
    #[arg(long)]
    pub prefer: Vec<String>,

    /// Product id to prioritize in every meal.
    #[arg(long)]
    pub optional: Vec<String>,

    /// Allow more items per meal, a wider tolerance, and scaled portions.
    #[arg(long)]
    pub flexible: bool,
}

#[derive(Args, Debug)]
pub struct CustomizeArgs {
    /// Plan identifier.
    pub plan_id: String,

    /// JSON file with a full customization request.
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Swap an item, as OLD_ID:NEW_ID.
    #[arg(long)]
    pub swap: Option<String>,

    /// Remove the item with this id.
    #[arg(long)]
    pub remove: Option<String>,

    /// Only remove from this meal.
    #[arg(long, requires = "remove")]
    pub meal: Option<String>,

    /// Only remove the item at this position within its meal.
    #[arg(long, requires = "remove")]
    pub index: Option<usize>,

    /// Name of a manual item to add.
    #[arg(long)]
    pub add_name: Option<String>,

    /// Calories of the manual item.
    #[arg(long, requires = "add_name")]
    pub add_calories: Option<f64>,

    /// Serving descriptor of the manual item.
    #[arg(long, requires = "add_name")]
    pub add_serving: Option<String>,

    /// Id of the manual item.
    #[arg(long, requires = "add_name")]
    pub add_id: Option<String>,

    /// Meal whose calorie target to change.
    #[arg(long, requires = "adjust_target")]
    pub adjust_meal: Option<String>,

    /// New calorie target for --adjust-meal.
    #[arg(long, requires = "adjust_meal")]
    pub adjust_target: Option<f64>,
}

impl PlanArgs {
    /// Profile from flags, validated.
    pub fn profile(&self) -> Result<UserProfile> {
        let missing = |flag: &str| PlanError::InvalidInput(format!("--{} is required", flag));

        let profile = UserProfile {
            age: self.age.ok_or_else(|| missing("age"))?,
            sex: Sex::from_name(self.sex.as_deref().ok_or_else(|| missing("sex"))?),
            height_cm: self.height.ok_or_else(|| missing("height"))?,
            weight_kg: self.weight.ok_or_else(|| missing("weight"))?,
            activity_level: ActivityLevel::from_name(&self.activity),
            goal: Goal::from_name(&self.goal),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            exclude: self.exclude.clone(),
            dietary_restrictions: self
                .restriction
                .iter()
                .map(|r| DietaryRestriction::from(r.as_str()))
                .collect(),
            prefer: self.prefer.clone(),
        }
    }
}

impl CustomizeArgs {
    /// Request from `--request`, with any operation flags taking precedence.
    pub fn to_request(&self) -> Result<CustomizationRequest> {
        let mut request = match &self.request {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => CustomizationRequest::default(),
        };

        if let Some(swap) = &self.swap {
            let (old_id, new_id) = swap.split_once(':').ok_or_else(|| {
                PlanError::InvalidInput(format!("--swap expects OLD_ID:NEW_ID, got '{}'", swap))
            })?;
            request.swap = Some(SwapRequest {
                old_id: old_id.trim().to_string(),
                new_id: new_id.trim().to_string(),
            });
        }

        if let Some(id) = &self.remove {
            request.remove = Some(RemoveRequest {
                id: id.clone(),
                meal_name: self.meal.clone(),
                item_index: self.index,
            });
        }

        if let Some(name) = &self.add_name {
            request.add_manual = Some(ManualItem {
                id: self.add_id.clone(),
                name: name.clone(),
                serving: self.add_serving.clone(),
                calories: self.add_calories.unwrap_or(0.0),
                ..Default::default()
            });
        }

        if let (Some(meal_name), Some(new_target)) = (&self.adjust_meal, self.adjust_target) {
            request.adjust_meal_calories = Some(AdjustRequest {
                meal_name: meal_name.clone(),
                new_target,
            });
        }

        Ok(request)
    }
}
