use dialoguer::{Confirm, Input, Select};

use crate::error::{PlanError, Result};
use crate::models::{ActivityLevel, DietaryRestriction, Goal, Preferences, Sex, UserProfile};

fn prompt_number(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for age in years.
pub fn prompt_age() -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Age (years)")
        .default("30".to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("Invalid age: {}", input)))
}

pub fn prompt_sex() -> Result<Sex> {
    let options = ["male", "female"];
    let selection = Select::new()
        .with_prompt("Sex")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(if selection == 1 { Sex::Female } else { Sex::Male })
}

pub fn prompt_activity_level() -> Result<ActivityLevel> {
    let options: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(2)
        .interact()?;

    Ok(ActivityLevel::ALL[selection])
}

pub fn prompt_goal() -> Result<Goal> {
    let options: Vec<&str> = Goal::ALL.iter().map(|g| g.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Goal")
        .items(&options)
        .default(1)
        .interact()?;

    Ok(Goal::ALL[selection])
}

/// Collect a full profile interactively and validate it.
pub fn prompt_profile() -> Result<UserProfile> {
    let age = prompt_age()?;
    let sex = prompt_sex()?;
    let height_cm = prompt_number("Height (cm)", "175")?;
    let weight_kg = prompt_number("Weight (kg)", "70")?;
    let activity_level = prompt_activity_level()?;
    let goal = prompt_goal()?;

    let profile = UserProfile {
        age,
        sex,
        height_cm,
        weight_kg,
        activity_level,
        goal,
    };
    profile.validate()?;
    Ok(profile)
}

/// Prompt for a comma-separated list; empty input yields an empty list.
fn prompt_list(prompt: &str) -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// Collect exclusions and dietary restrictions.
pub fn prompt_preferences() -> Result<Preferences> {
    let exclude = prompt_list("Exclude (comma-separated, Enter for none)")?;
    let dietary_restrictions = prompt_list("Dietary restrictions, e.g. vegetarian, vegan")?
        .into_iter()
        .map(DietaryRestriction::from)
        .collect();

    Ok(Preferences {
        exclude,
        dietary_restrictions,
        prefer: Vec::new(),
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
