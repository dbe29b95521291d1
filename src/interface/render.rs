use crate::models::{ChangeLogEntry, DailyPlan, MealItem};

fn macro_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn display_item(item: &MealItem, name_width: usize) {
    println!(
        "    {:<width$}  {:>10}  {:>6.0} kcal | P {:>5} F {:>5} C {:>5}",
        item.name,
        item.serving,
        item.calories,
        macro_cell(item.macros.protein),
        macro_cell(item.macros.fat),
        macro_cell(item.macros.carbs),
        width = name_width
    );
}

/// Display a daily plan with its meals and totals.
pub fn display_daily_plan(plan: &DailyPlan) {
    println!();
    println!("=== Daily Plan {} ===", plan.plan_id);
    println!(
        "BMR {:.0} kcal | TDEE {:.0} kcal | Target {:.0} kcal | Mode {}",
        plan.bmr,
        plan.tdee,
        plan.daily_calorie_target,
        if plan.flexibility { "flexible" } else { "strict" }
    );

    let name_width = plan
        .meals
        .iter()
        .flat_map(|m| m.items.iter())
        .map(|i| i.name.len())
        .max()
        .unwrap_or(10);

    for meal in &plan.meals {
        println!();
        println!(
            "  {} - {:.0} / {:.0} kcal",
            meal.name, meal.actual_calories, meal.target_calories
        );
        if meal.items.is_empty() {
            println!("    (no items)");
        }
        for item in &meal.items {
            display_item(item, name_width);
        }
    }

    let m = &plan.daily_macros;
    println!();
    println!("--- Summary ---");
    println!("Total items: {}", plan.item_count());
    println!("Total calories: {:.0}", m.total_calories);
    println!(
        "Protein {:.1} g ({:.1}%) | Fat {:.1} g ({:.1}%) | Carbs {:.1} g ({:.1}%)",
        m.total_protein, m.protein_pct, m.total_fat, m.fat_pct, m.total_carbs, m.carbs_pct
    );
    println!("Sugar {:.1} g | Salt {:.2} g", m.total_sugar, m.total_salt);
    if plan.optional_products_used > 0 {
        println!("Optional products used: {}", plan.optional_products_used);
    }
    println!();
}

/// Display a customization change log.
pub fn display_change_log(log: &[ChangeLogEntry]) {
    if log.is_empty() {
        println!("No changes.");
        return;
    }

    println!();
    println!("=== Changes ===");
    for entry in log {
        let marker = if entry.change_type.is_failure() { "!" } else { "*" };
        match &entry.meal {
            Some(meal) => println!("  {} [{}] {}", marker, meal, entry.description),
            None => println!("  {} {}", marker, entry.description),
        }
    }
    println!();
}
