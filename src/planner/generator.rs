use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{DailyPlan, FoodItem, Meal, Preferences, UserProfile};
use crate::planner::builder::MealBuilder;
use crate::planner::calculations::{
    aggregate_daily_macros, calculate_bmr, calculate_daily_target, calculate_tdee,
    split_meal_targets,
};
use crate::state::{DiscoveryFilters, ProductCatalog};

/// Produces full-day plans from a profile and the injected product catalog.
pub struct PlanGenerator {
    catalog: Arc<dyn ProductCatalog>,
    config: PlannerConfig,
}

impl PlanGenerator {
    pub fn new(catalog: Arc<dyn ProductCatalog>, config: PlannerConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate a plan. Catalog failures propagate; an empty catalog yields
    /// an empty but valid plan.
    pub async fn generate(
        &self,
        profile: &UserProfile,
        preferences: &Preferences,
        optional_ids: &[String],
        flexibility: bool,
    ) -> Result<DailyPlan> {
        let candidates = self.load_candidates(optional_ids).await?;
        Ok(build_plan(
            profile,
            preferences,
            optional_ids,
            flexibility,
            &candidates,
            &self.config,
        ))
    }

    /// Optional products first, then bulk discovery, deduplicated by id.
    async fn load_candidates(&self, optional_ids: &[String]) -> Result<Vec<FoodItem>> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut candidates = Vec::new();

        for id in optional_ids {
            if seen.contains(id) {
                continue;
            }
            match self.catalog.find(id).await? {
                Some(item) => {
                    seen.insert(item.id.clone());
                    candidates.push(item);
                }
                None => warn!("Optional product {} not found in catalog", id),
            }
        }

        let filters = DiscoveryFilters {
            exclude_ids: seen.iter().cloned().collect(),
            name_contains: None,
        };
        let discovered = self
            .catalog
            .discover(&filters, self.config.discovery_limit)
            .await?;
        for item in discovered {
            if seen.insert(item.id.clone()) {
                candidates.push(item);
            }
        }

        debug!("Loaded {} candidate products", candidates.len());
        Ok(candidates)
    }
}

/// Pure plan construction over an already-loaded candidate pool.
pub fn build_plan(
    profile: &UserProfile,
    preferences: &Preferences,
    optional_ids: &[String],
    flexibility: bool,
    candidates: &[FoodItem],
    config: &PlannerConfig,
) -> DailyPlan {
    let bmr = calculate_bmr(profile);
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let daily_target = calculate_daily_target(tdee, profile.goal);
    let targets = split_meal_targets(daily_target, &config.meal_distribution);

    let prioritized: HashSet<String> = optional_ids.iter().cloned().collect();

    let meals: Vec<Meal> = if candidates.is_empty() {
        info!("No candidate products available, returning an empty plan");
        targets
            .named()
            .iter()
            .map(|(name, target)| Meal::empty(*name, *target))
            .collect()
    } else {
        let builder = MealBuilder::new(
            config.selection(flexibility),
            flexibility,
            preferences,
            &prioritized,
        );
        targets
            .named()
            .iter()
            .map(|(name, target)| builder.build(name, *target, candidates))
            .collect()
    };

    let daily_macros = aggregate_daily_macros(&meals);
    let optional_products_used = meals
        .iter()
        .flat_map(|m| m.items.iter())
        .filter(|item| prioritized.contains(&item.id))
        .count();

    info!(
        "Generated plan: target {:.0} kcal, planned {:.0} kcal across {} items",
        daily_target,
        daily_macros.total_calories,
        meals.iter().map(|m| m.items.len()).sum::<usize>()
    );

    DailyPlan {
        plan_id: Uuid::now_v7().to_string(),
        bmr,
        tdee,
        daily_calorie_target: daily_target,
        meals,
        daily_macros,
        flexibility,
        optional_products_used,
        is_active: true,
        created_at: Utc::now(),
    }
}
