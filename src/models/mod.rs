pub mod food;
pub mod plan;
pub mod profile;
pub mod request;

pub use food::{FoodItem, Nutrients};
pub use plan::{ChangeLogEntry, ChangeType, DailyMacros, DailyPlan, MacroBreakdown, Meal, MealItem};
pub use profile::{ActivityLevel, DietaryRestriction, Goal, Preferences, Sex, UserProfile};
pub use request::{AdjustRequest, CustomizationRequest, ManualItem, RemoveRequest, SwapRequest};
