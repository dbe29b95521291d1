use crate::models::{CustomizationRequest, DailyPlan};
use crate::planner::constants::ADJUST_IDEMPOTENCY_KCAL;

/// Whether applying `request` would leave `plan` unchanged.
///
/// Checked before customizing so a no-op request can return the stored plan
/// with an empty change log. Every present operation must be a no-op:
/// - swap: `old_id == new_id`
/// - remove: nothing matches the same predicate the removal uses
/// - adjust: the meal exists and its target moves by less than 1 kcal
/// - add_manual: never a no-op
///
/// A request with no operations is idempotent.
pub fn check_idempotency(plan: &DailyPlan, request: &CustomizationRequest) -> bool {
    if request.add_manual.is_some() {
        return false;
    }

    let swap_noop = request
        .swap
        .as_ref()
        .is_none_or(|swap| swap.old_id == swap.new_id);

    let remove_noop = request
        .remove
        .as_ref()
        .is_none_or(|remove| remove.find_match(&plan.meals).is_none());

    let adjust_noop = request.adjust_meal_calories.as_ref().is_none_or(|adjust| {
        plan.meal(&adjust.meal_name)
            .is_some_and(|meal| (meal.target_calories - adjust.new_target).abs() < ADJUST_IDEMPOTENCY_KCAL)
    });

    swap_noop && remove_noop && adjust_noop
}
