use chrono::Utc;
use tracing::{info, warn};

use crate::models::{
    AdjustRequest, ChangeLogEntry, ChangeType, CustomizationRequest, DailyPlan, FoodItem,
    MacroBreakdown, ManualItem, MealItem, RemoveRequest, SwapRequest,
};
use crate::planner::calculations::aggregate_daily_macros;
use crate::planner::constants::{DEFAULT_MANUAL_SERVING, MANUAL_ID_PREFIX};
use crate::planner::serving::snapshot_item;

/// Apply a request to a copy of `plan`.
///
/// Operations run in fixed order (swap, remove, add_manual, adjust), each
/// contributing one log entry, followed by a full recomputation of meal and
/// daily totals. `replacement` is the already-resolved product for the swap.
/// The input plan is never modified.
pub fn apply_customization(
    plan: &DailyPlan,
    request: &CustomizationRequest,
    replacement: Option<&FoodItem>,
) -> (DailyPlan, Vec<ChangeLogEntry>) {
    let mut working = plan.clone();
    let mut log = Vec::new();

    if let Some(swap) = &request.swap {
        log.push(swap_item(&mut working, swap, replacement));
    }
    if let Some(remove) = &request.remove {
        log.push(remove_item(&mut working, remove));
    }
    if let Some(manual) = &request.add_manual {
        log.push(add_manual_item(&mut working, manual));
    }
    if let Some(adjust) = &request.adjust_meal_calories {
        log.push(adjust_meal_calories(&mut working, adjust));
    }

    recompute_plan(&mut working);

    for entry in &log {
        if entry.change_type.is_failure() {
            warn!("{:?}: {}", entry.change_type, entry.description);
        } else {
            info!("{:?}: {}", entry.change_type, entry.description);
        }
    }

    (working, log)
}

/// Replace the first item with `old_id` by a default-serving snapshot of `replacement`.
pub fn swap_item(
    plan: &mut DailyPlan,
    swap: &SwapRequest,
    replacement: Option<&FoodItem>,
) -> ChangeLogEntry {
    let Some((mi, ii)) = plan.locate_item(&swap.old_id) else {
        return ChangeLogEntry::new(
            ChangeType::SwapFailed,
            format!("Item {} not found in plan", swap.old_id),
            None,
        );
    };

    let meal = &mut plan.meals[mi];
    let Some(product) = replacement else {
        return ChangeLogEntry::new(
            ChangeType::SwapFailed,
            format!("Replacement product {} not found", swap.new_id),
            Some(&meal.name),
        );
    };

    let new_item = snapshot_item(product);
    let old_name = std::mem::replace(&mut meal.items[ii], new_item).name;
    meal.recompute_total();

    ChangeLogEntry::new(
        ChangeType::Swap,
        format!("Swapped {} for {} in {}", old_name, product.name, meal.name),
        Some(&meal.name),
    )
}

/// Remove the first item matching the request's three-way predicate.
pub fn remove_item(plan: &mut DailyPlan, remove: &RemoveRequest) -> ChangeLogEntry {
    let Some((mi, ii)) = remove.find_match(&plan.meals) else {
        return ChangeLogEntry::new(
            ChangeType::RemoveFailed,
            format!("No item matching {} found", remove.id),
            remove.meal_name.as_deref(),
        );
    };

    let meal = &mut plan.meals[mi];
    let removed = meal.items.remove(ii);
    meal.recompute_total();

    ChangeLogEntry::new(
        ChangeType::Remove,
        format!("Removed {} from {}", removed.name, meal.name),
        Some(&meal.name),
    )
}

/// Add a manual item to the meal with the lowest actual calories, merging
/// into an existing item with the same id or normalized name.
pub fn add_manual_item(plan: &mut DailyPlan, manual: &ManualItem) -> ChangeLogEntry {
    let incoming = manual_to_meal_item(manual);

    let Some(target) = lowest_calorie_meal(plan) else {
        return ChangeLogEntry::new(
            ChangeType::AddManual,
            format!("Plan has no meals to add {} to", incoming.name),
            None,
        );
    };
    let meal = &mut plan.meals[target];

    let incoming_key = normalize_name(&incoming.name);
    let existing = meal.items.iter_mut().find(|item| {
        manual.id.as_deref().is_some_and(|id| id == item.id)
            || normalize_name(&item.name) == incoming_key
    });

    let description = match existing {
        Some(item) => {
            item.calories += incoming.calories;
            item.macros = item.macros.merged(&incoming.macros);
            item.serving = combine_servings(&item.serving, &incoming.serving);
            format!("Merged {} into existing {} in {}", incoming.name, item.name, meal.name)
        }
        None => {
            let description = format!("Added {} to {}", incoming.name, meal.name);
            meal.items.push(incoming);
            description
        }
    };
    meal.recompute_total();

    ChangeLogEntry::new(ChangeType::AddManual, description, Some(&meal.name))
}

/// Set a meal's target and shift the daily target by the same delta.
pub fn adjust_meal_calories(plan: &mut DailyPlan, adjust: &AdjustRequest) -> ChangeLogEntry {
    let Some(meal) = plan.meals.iter_mut().find(|m| m.is_named(&adjust.meal_name)) else {
        return ChangeLogEntry::new(
            ChangeType::AdjustCaloriesFailed,
            format!("Meal {} not found", adjust.meal_name),
            Some(&adjust.meal_name),
        );
    };

    let old_target = meal.target_calories;
    meal.target_calories = adjust.new_target;
    let entry = ChangeLogEntry::new(
        ChangeType::AdjustCalories,
        format!(
            "Adjusted {} target from {:.0} to {:.0} kcal",
            meal.name, old_target, adjust.new_target
        ),
        Some(&meal.name),
    );

    plan.daily_calorie_target += adjust.new_target - old_target;
    entry
}

/// Re-derive every meal total and the daily aggregates from the items.
pub fn recompute_plan(plan: &mut DailyPlan) {
    for meal in &mut plan.meals {
        meal.recompute_total();
    }
    plan.daily_macros = aggregate_daily_macros(&plan.meals);
}

/// Identical descriptors become "2 x <desc>", otherwise "<a> + <b>".
pub fn combine_servings(existing: &str, incoming: &str) -> String {
    if existing == incoming {
        format!("2 x {}", existing)
    } else {
        format!("{} + {}", existing, incoming)
    }
}

/// First meal with the lowest actual calories.
fn lowest_calorie_meal(plan: &DailyPlan) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, meal) in plan.meals.iter().enumerate() {
        if best.is_none_or(|(_, cal)| meal.actual_calories < cal) {
            best = Some((idx, meal.actual_calories));
        }
    }
    best.map(|(idx, _)| idx)
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn manual_to_meal_item(manual: &ManualItem) -> MealItem {
    let id = manual
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("{}{}", MANUAL_ID_PREFIX, Utc::now().timestamp_millis()));

    MealItem {
        id,
        name: manual.name.trim().to_string(),
        serving: manual
            .serving
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MANUAL_SERVING.to_string()),
        calories: manual.calories,
        macros: MacroBreakdown {
            protein: manual.protein,
            fat: manual.fat,
            carbs: manual.carbs,
            sugar: manual.sugar,
            salt: manual.salt,
        },
    }
}
