use std::collections::HashSet;

use tracing::debug;

use crate::config::SelectionParams;
use crate::models::{FoodItem, Meal, Preferences};
use crate::planner::constants::*;
use crate::planner::preferences::matches;
use crate::planner::serving::{scale_item, snapshot_item};

/// Greedy, tolerance-bounded item selection for a single meal.
#[derive(Debug, Clone)]
pub struct MealBuilder<'a> {
    params: SelectionParams,
    flexible: bool,
    preferences: &'a Preferences,
    prioritized: &'a HashSet<String>,
}

impl<'a> MealBuilder<'a> {
    pub fn new(
        params: SelectionParams,
        flexible: bool,
        preferences: &'a Preferences,
        prioritized: &'a HashSet<String>,
    ) -> Self {
        Self {
            params,
            flexible,
            preferences,
            prioritized,
        }
    }

    /// Prioritized candidates first, then the rest; each group sorted by
    /// `(id, name)` so selection is deterministic.
    pub fn order_candidates<'c>(&self, candidates: &'c [FoodItem]) -> Vec<&'c FoodItem> {
        let (mut first, mut rest): (Vec<&FoodItem>, Vec<&FoodItem>) = candidates
            .iter()
            .partition(|food| self.prioritized.contains(&food.id));

        let by_key = |a: &&FoodItem, b: &&FoodItem| (&a.id, &a.name).cmp(&(&b.id, &b.name));
        first.sort_by(by_key);
        rest.sort_by(by_key);
        first.extend(rest);
        first
    }

    /// Build a meal as close to `target` as the tolerance band allows.
    ///
    /// Accepts candidates whole while the running total stays under the
    /// upper band and stops once the lower band is reached. In flexible mode
    /// a candidate that would overshoot may be accepted at a reduced portion,
    /// which ends the meal. A meal with no accepted items is valid.
    pub fn build(&self, name: &str, target: f64, candidates: &[FoodItem]) -> Meal {
        let tolerance = self.params.tolerance;
        let upper = target * (1.0 + tolerance);
        let lower = target * (1.0 - tolerance);

        let mut meal = Meal::empty(name, target);
        let mut total = 0.0;

        for food in self.order_candidates(candidates) {
            if meal.items.len() >= self.params.max_items {
                break;
            }

            if !matches(food, self.preferences) {
                debug!("{}: rejected by preferences: {}", name, food.debug_string());
                continue;
            }

            let item = snapshot_item(food);

            if total + item.calories <= upper {
                total += item.calories;
                debug!("{}: accepted {} ({:.1} kcal, total {:.1})", name, item.name, item.calories, total);
                meal.items.push(item);
                if total >= lower {
                    break;
                }
                continue;
            }

            if self.flexible && total < target {
                let remaining = target - total;
                if remaining > MIN_SCALE_REMAINING_KCAL {
                    let scale = remaining / item.calories;
                    if (MIN_PORTION_SCALE..MAX_PORTION_SCALE).contains(&scale) {
                        let scaled = scale_item(&item, scale);
                        debug!(
                            "{}: accepted {} scaled by {:.2} ({:.1} kcal)",
                            name, scaled.name, scale, scaled.calories
                        );
                        meal.items.push(scaled);
                        break;
                    }
                }
            }

            debug!("{}: skipped {} ({:.1} kcal would exceed {:.1})", name, item.name, item.calories, upper);
        }

        meal.recompute_total();
        meal
    }
}
