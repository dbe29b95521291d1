#[macro_use]
extern crate assert_float_eq;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use nutriplan_rs::config::SelectionParams;
use nutriplan_rs::models::{DietaryRestriction, FoodItem, Preferences};
use nutriplan_rs::planner::MealBuilder;

fn random_pool(rng: &mut StdRng, size: usize) -> Vec<FoodItem> {
    (0..size)
        .map(|i| {
            let kcal = rng.gen_range(20.0..600.0);
            let food = FoodItem::new(format!("{:03}", i), format!("Product {}", i), kcal)
                .with_macros(rng.gen_range(0.0..30.0), rng.gen_range(0.0..30.0), rng.gen_range(0.0..60.0));
            if rng.gen_bool(0.5) {
                food.with_serving(format!("{}g", rng.gen_range(20..250)))
            } else {
                food
            }
        })
        .collect()
}

#[test]
fn test_meal_totals_match_items_on_random_pools() {
    let mut rng = StdRng::seed_from_u64(42);
    let prefs = Preferences::default();
    let prioritized = HashSet::new();

    for flexible in [false, true] {
        let params = if flexible {
            SelectionParams::flexible()
        } else {
            SelectionParams::strict()
        };
        let builder = MealBuilder::new(params, flexible, &prefs, &prioritized);

        for _ in 0..100 {
            let size = rng.gen_range(0..20);
            let pool = random_pool(&mut rng, size);
            let target = rng.gen_range(200.0..1200.0);
            let meal = builder.build("Lunch", target, &pool);

            let sum: f64 = meal.items.iter().map(|i| i.calories).sum();
            assert_float_absolute_eq!(meal.actual_calories, sum, 1e-9);
            assert!(meal.items.len() <= params.max_items);
            assert!(meal.actual_calories <= target * (1.0 + params.tolerance) + 1e-9);
            assert_eq!(meal.target_calories, target);
        }
    }
}

#[test]
fn test_item_caps_per_mode() {
    let pool: Vec<FoodItem> = (0..10)
        .map(|i| FoodItem::new(format!("{}", i), format!("Cracker {}", i), 10.0))
        .collect();
    let prefs = Preferences::default();
    let prioritized = HashSet::new();

    let strict = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);
    assert_eq!(strict.build("Breakfast", 1000.0, &pool).items.len(), 3);

    let flexible = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);
    assert_eq!(flexible.build("Breakfast", 1000.0, &pool).items.len(), 5);
}

#[test]
fn test_serving_snapshot_uses_product_serving() {
    let pool = vec![FoodItem::new("1", "Granola", 350.0)
        .with_serving("50g")
        .with_macros(8.0, 12.0, 60.0)];
    let prefs = Preferences::default();
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);

    let meal = builder.build("Breakfast", 180.0, &pool);
    assert_eq!(meal.items.len(), 1);

    let item = &meal.items[0];
    assert_eq!(item.serving, "50g");
    assert_float_absolute_eq!(item.calories, 175.0, 1e-9);
    assert_float_absolute_eq!(item.macros.protein.unwrap(), 4.0, 1e-9);
    assert!(item.macros.sugar.is_none());
}

#[test]
fn test_flexible_scales_overshooting_item() {
    let pool = vec![
        FoodItem::new("a", "Rice Bowl", 300.0),
        FoodItem::new("b", "Lasagna", 400.0),
    ];
    let prefs = Preferences::default();
    let prioritized = HashSet::new();

    let flexible = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);
    let meal = flexible.build("Dinner", 500.0, &pool);
    assert_eq!(meal.items.len(), 2);
    assert_eq!(meal.items[1].serving, "50g");
    assert_float_absolute_eq!(meal.items[1].calories, 200.0, 1e-9);
    assert_float_absolute_eq!(meal.actual_calories, 500.0, 1e-9);

    let strict = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);
    let meal = strict.build("Dinner", 500.0, &pool);
    assert_eq!(meal.items.len(), 1);
    assert_float_absolute_eq!(meal.actual_calories, 300.0, 1e-9);
}

#[test]
fn test_flexible_needs_more_than_50_kcal_remaining_to_scale() {
    let pool = vec![
        FoodItem::new("a", "Toast", 155.0),
        FoodItem::new("b", "Jam", 100.0),
    ];
    let prefs = Preferences::default();
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);

    // 45 kcal remain after the toast
    let meal = builder.build("Breakfast", 200.0, &pool);
    assert_eq!(meal.items.len(), 1);
    assert_float_absolute_eq!(meal.actual_calories, 155.0, 1e-9);
}

#[test]
fn test_flexible_skips_scale_below_window_and_continues() {
    let pool = vec![
        FoodItem::new("a", "Rice Bowl", 300.0),
        FoodItem::new("b", "Cheesecake", 1000.0),
        FoodItem::new("c", "Apple", 60.0),
    ];
    let prefs = Preferences::default();
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);

    // Cheesecake would need a 0.1 portion
    let meal = builder.build("Dinner", 400.0, &pool);
    let ids: Vec<&str> = meal.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_float_absolute_eq!(meal.actual_calories, 360.0, 1e-9);
}

#[test]
fn test_flexible_accepts_scale_at_window_floor_and_stops() {
    let pool = vec![
        FoodItem::new("a", "Rice Bowl", 300.0),
        FoodItem::new("b", "Lasagna", 200.0),
        FoodItem::new("c", "Apple", 10.0),
    ];
    let prefs = Preferences::default();
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);

    // 60 kcal remain, lasagna scaled to exactly 0.3
    let meal = builder.build("Dinner", 360.0, &pool);
    let ids: Vec<&str> = meal.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(meal.items[1].serving, "30g");
    assert_float_absolute_eq!(meal.items[1].calories, 60.0, 1e-9);
    assert_float_absolute_eq!(meal.actual_calories, 360.0, 1e-9);
}

#[test]
fn test_prioritized_products_selected_first() {
    let pool = vec![
        FoodItem::new("1", "Apple", 100.0),
        FoodItem::new("2", "Banana", 100.0),
        FoodItem::new("9", "Protein Bar", 100.0),
    ];
    let prefs = Preferences::default();
    let prioritized: HashSet<String> = ["9".to_string()].into();
    let builder = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);

    let meal = builder.build("Breakfast", 200.0, &pool);
    let ids: Vec<&str> = meal.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["9", "1"]);
}

#[test]
fn test_restrictions_and_exclusions_filter_candidates() {
    let pool = vec![
        FoodItem::new("1", "Greek Yogurt", 100.0),
        FoodItem::new("2", "Chicken Breast", 100.0),
        FoodItem::new("3", "Oat Crackers", 100.0).with_brand("Nutty Co"),
        FoodItem::new("4", "Lentil Soup", 100.0),
    ];
    let prefs = Preferences {
        exclude: vec!["nutty".to_string()],
        dietary_restrictions: vec![DietaryRestriction::Vegan],
        prefer: Vec::new(),
    };
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::flexible(), true, &prefs, &prioritized);

    let meal = builder.build("Lunch", 1000.0, &pool);
    let ids: Vec<&str> = meal.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["4"]);
}

#[test]
fn test_empty_pool_gives_empty_meal() {
    let prefs = Preferences::default();
    let prioritized = HashSet::new();
    let builder = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);

    let meal = builder.build("Lunch", 800.0, &[]);
    assert!(meal.items.is_empty());
    assert_eq!(meal.actual_calories, 0.0);
}
