#[macro_use]
extern crate assert_float_eq;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use nutriplan_rs::config::{PlannerConfig, SelectionParams};
use nutriplan_rs::error::{PlanError, Result};
use nutriplan_rs::models::{ActivityLevel, FoodItem, Goal, Preferences, Sex, UserProfile};
use nutriplan_rs::planner::{aggregate_daily_macros, MealBuilder, PlanGenerator};
use nutriplan_rs::state::{DiscoveryFilters, LocalCatalog, ProductCatalog};

/// Catalog whose backend is always down.
struct UnavailableCatalog;

#[async_trait]
impl ProductCatalog for UnavailableCatalog {
    async fn find(&self, _id: &str) -> Result<Option<FoodItem>> {
        Err(PlanError::Io(std::io::Error::other("catalog offline")))
    }

    async fn find_by_name(&self, _fragment: &str) -> Result<Option<FoodItem>> {
        Err(PlanError::Io(std::io::Error::other("catalog offline")))
    }

    async fn discover(&self, _filters: &DiscoveryFilters, _max_items: usize) -> Result<Vec<FoodItem>> {
        Err(PlanError::Io(std::io::Error::other("catalog offline")))
    }
}

fn profile() -> UserProfile {
    UserProfile {
        age: 30,
        sex: Sex::Male,
        height_cm: 180.0,
        weight_kg: 75.0,
        activity_level: ActivityLevel::ModeratelyActive,
        goal: Goal::Maintain,
    }
}

fn products() -> Vec<FoodItem> {
    vec![
        FoodItem::new("1", "Oatmeal", 370.0).with_serving("80g").with_macros(13.0, 7.0, 60.0),
        FoodItem::new("2", "Greek Yogurt", 97.0).with_serving("150g").with_macros(9.0, 5.0, 4.0),
        FoodItem::new("3", "Chicken Breast", 165.0).with_serving("200g").with_macros(31.0, 3.6, 0.0),
        FoodItem::new("4", "Brown Rice", 360.0).with_serving("100g").with_macros(7.5, 2.7, 76.0),
        FoodItem::new("5", "Lentil Stew", 120.0).with_serving("300g").with_macros(9.0, 0.4, 20.0),
        FoodItem::new("6", "Almonds", 580.0).with_serving("30g").with_macros(21.0, 50.0, 22.0),
        FoodItem::new("7", "Banana", 89.0).with_serving("120g").with_macros(1.1, 0.3, 23.0),
        FoodItem::new("8", "Pasta", 350.0).with_serving("120g").with_macros(12.0, 1.5, 72.0),
    ]
}

fn generator(items: Vec<FoodItem>) -> PlanGenerator {
    PlanGenerator::new(Arc::new(LocalCatalog::new(items)), PlannerConfig::default())
}

#[tokio::test]
async fn test_generate_plan_figures() {
    let plan = generator(products())
        .generate(&profile(), &Preferences::default(), &[], false)
        .await
        .unwrap();

    assert_float_absolute_eq!(plan.bmr, 1730.0, 1e-9);
    assert_float_absolute_eq!(plan.tdee, 2681.5, 1e-9);
    assert_float_absolute_eq!(plan.daily_calorie_target, 2681.5, 1e-9);

    let names: Vec<&str> = plan.meals.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Breakfast", "Lunch", "Dinner"]);

    let target_sum: f64 = plan.meals.iter().map(|m| m.target_calories).sum();
    assert_float_absolute_eq!(target_sum, plan.daily_calorie_target, 1e-6);

    for meal in &plan.meals {
        assert!(meal.items.len() <= 3);
        assert_float_absolute_eq!(meal.actual_calories, meal.item_calories(), 1e-9);
    }
    assert_eq!(plan.daily_macros, aggregate_daily_macros(&plan.meals));
    assert!(plan.is_active);
    assert!(!plan.flexibility);
}

#[tokio::test]
async fn test_generate_is_deterministic_apart_from_identity() {
    let generator = generator(products());
    let a = generator
        .generate(&profile(), &Preferences::default(), &[], true)
        .await
        .unwrap();
    let b = generator
        .generate(&profile(), &Preferences::default(), &[], true)
        .await
        .unwrap();

    assert_ne!(a.plan_id, b.plan_id);
    assert_eq!(a.meals, b.meals);
    assert_eq!(a.daily_macros, b.daily_macros);
}

#[tokio::test]
async fn test_empty_catalog_yields_empty_plan() {
    let plan = generator(Vec::new())
        .generate(&profile(), &Preferences::default(), &[], false)
        .await
        .unwrap();

    assert_eq!(plan.meals.len(), 3);
    assert_eq!(plan.item_count(), 0);
    assert_eq!(plan.daily_macros.total_calories, 0.0);
    assert_eq!(plan.daily_macros.carbs_pct, 0.0);
    assert_float_absolute_eq!(plan.meals[1].target_calories, 2681.5 * 0.40, 1e-9);
}

#[tokio::test]
async fn test_optional_products_lead_each_meal() {
    let optional = vec!["6".to_string(), "missing".to_string()];
    let plan = generator(products())
        .generate(&profile(), &Preferences::default(), &optional, false)
        .await
        .unwrap();

    for meal in &plan.meals {
        assert_eq!(meal.items.first().map(|i| i.id.as_str()), Some("6"));
    }
    assert_eq!(plan.optional_products_used, 3);
}

#[tokio::test]
async fn test_restrictions_respected() {
    let prefs = Preferences {
        exclude: vec!["oat".to_string()],
        dietary_restrictions: vec!["vegetarian".into()],
        prefer: Vec::new(),
    };
    let plan = generator(products())
        .generate(&profile(), &prefs, &[], true)
        .await
        .unwrap();

    for item in plan.meals.iter().flat_map(|m| m.items.iter()) {
        assert_ne!(item.id, "1");
        assert_ne!(item.id, "3");
    }
}

#[tokio::test]
async fn test_catalog_failure_propagates() {
    let generator = PlanGenerator::new(Arc::new(UnavailableCatalog), PlannerConfig::default());
    let result = generator
        .generate(&profile(), &Preferences::default(), &[], false)
        .await;

    assert!(matches!(result, Err(PlanError::Io(_))));
}

#[tokio::test]
async fn test_single_prioritized_product_end_to_end() {
    let granola = FoodItem::new("42", "Granola", 350.0).with_serving("50g");
    let optional = vec!["42".to_string()];

    let prefs = Preferences::default();
    let prioritized: HashSet<String> = optional.iter().cloned().collect();
    let builder = MealBuilder::new(SelectionParams::strict(), false, &prefs, &prioritized);
    let breakfast = builder.build("Breakfast", 500.0, std::slice::from_ref(&granola));
    assert_eq!(breakfast.items.len(), 1);
    assert_eq!(breakfast.items[0].serving, "50g");
    assert_float_absolute_eq!(breakfast.actual_calories, 175.0, 1e-9);

    let plan = generator(vec![granola])
        .generate(&profile(), &prefs, &optional, false)
        .await
        .unwrap();

    let meal_sum: f64 = plan.meals.iter().map(|m| m.actual_calories).sum();
    assert_float_absolute_eq!(plan.daily_macros.total_calories, meal_sum, 1e-9);
    assert_float_absolute_eq!(meal_sum, 3.0 * 175.0, 1e-9);
    assert_eq!(plan.optional_products_used, 3);
}
