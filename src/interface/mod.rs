pub mod prompts;
pub mod render;

pub use prompts::{prompt_preferences, prompt_profile, prompt_yes_no};
pub use render::{display_change_log, display_daily_plan};
