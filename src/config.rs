//! Planner configuration types and loading

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{PlanError, Result};
use crate::planner::constants::*;

/// Fraction of the daily target given to each meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealDistribution {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
}

impl Default for MealDistribution {
    fn default() -> Self {
        Self {
            breakfast: BREAKFAST_SHARE,
            lunch: LUNCH_SHARE,
            dinner: DINNER_SHARE,
        }
    }
}

impl MealDistribution {
    pub fn total(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner
    }

    /// Shares sum to 1.0 within `DISTRIBUTION_EPSILON`.
    pub fn is_balanced(&self) -> bool {
        (self.total() - 1.0).abs() <= DISTRIBUTION_EPSILON
    }
}

/// Item cap and tolerance band for one selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    pub max_items: usize,
    pub tolerance: f64,
}

impl SelectionParams {
    pub fn strict() -> Self {
        Self {
            max_items: STRICT_MAX_ITEMS,
            tolerance: STRICT_TOLERANCE,
        }
    }

    pub fn flexible() -> Self {
        Self {
            max_items: FLEXIBLE_MAX_ITEMS,
            tolerance: FLEXIBLE_TOLERANCE,
        }
    }
}

/// Main planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub meal_distribution: MealDistribution,

    #[serde(default = "SelectionParams::strict")]
    pub strict: SelectionParams,

    #[serde(default = "SelectionParams::flexible")]
    pub flexible: SelectionParams,

    /// Maximum products requested from bulk discovery.
    pub discovery_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            meal_distribution: MealDistribution::default(),
            strict: SelectionParams::strict(),
            flexible: SelectionParams::flexible(),
            discovery_limit: DEFAULT_DISCOVERY_LIMIT,
        }
    }
}

impl PlannerConfig {
    /// Parameters for the requested mode.
    pub fn selection(&self, flexible: bool) -> SelectionParams {
        if flexible { self.flexible } else { self.strict }
    }

    /// Reject values the planner cannot work with.
    ///
    /// An unbalanced meal distribution is only warned about; it is kept as
    /// configured so the mismatch stays visible in the generated targets.
    pub fn validate(&self) -> Result<()> {
        for (label, params) in [("strict", self.strict), ("flexible", self.flexible)] {
            if params.max_items == 0 {
                return Err(PlanError::InvalidInput(format!(
                    "{} max_items must be positive",
                    label
                )));
            }
            if !(0.0..1.0).contains(&params.tolerance) {
                return Err(PlanError::InvalidInput(format!(
                    "{} tolerance {} outside [0, 1)",
                    label, params.tolerance
                )));
            }
        }

        let dist = self.meal_distribution;
        if dist.breakfast < 0.0 || dist.lunch < 0.0 || dist.dinner < 0.0 {
            return Err(PlanError::InvalidInput(
                "meal distribution shares must be non-negative".to_string(),
            ));
        }
        if !dist.is_balanced() {
            warn!(
                "Meal distribution sums to {:.4}, expected 1.0; meal targets will not add up to the daily target",
                dist.total()
            );
        }
        Ok(())
    }

    /// Load configuration with fallback chain: explicit path, `./nutriplan.json`, defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            let config = Self::load_from_file(path)?;
            config.validate()?;
            return Ok(config);
        }

        let local_config = PathBuf::from("nutriplan.json");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => {
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
