pub mod cli;
pub mod config;
pub mod customizer;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use config::PlannerConfig;
pub use customizer::PlanCustomizer;
pub use error::{PlanError, Result};
pub use models::{CustomizationRequest, DailyPlan, FoodItem, UserProfile};
pub use planner::PlanGenerator;
