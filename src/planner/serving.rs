use tracing::debug;

use crate::models::{FoodItem, MacroBreakdown, MealItem};
use crate::planner::constants::DEFAULT_SERVING_GRAMS;

/// Parse a serving string with a trailing `g` suffix, e.g. "150g" or "37.5 g".
///
/// Missing, negative or unparseable values fall back to `DEFAULT_SERVING_GRAMS`.
/// "0g" parses to zero.
pub fn parse_serving_grams(serving: Option<&str>) -> f64 {
    let Some(raw) = serving else {
        return DEFAULT_SERVING_GRAMS;
    };

    let text = raw.trim().to_lowercase();
    let parsed = text
        .strip_suffix('g')
        .and_then(|number| number.trim().parse::<f64>().ok())
        .filter(|grams| grams.is_finite() && *grams >= 0.0);

    match parsed {
        Some(grams) => grams,
        None => {
            debug!("Unparseable serving '{}', using {}g", raw, DEFAULT_SERVING_GRAMS);
            DEFAULT_SERVING_GRAMS
        }
    }
}

/// Format a gram amount as a serving descriptor.
pub fn format_grams(grams: f64) -> String {
    if (grams - grams.round()).abs() < 1e-9 {
        format!("{:.0}g", grams)
    } else {
        format!("{:.1}g", grams)
    }
}

/// Snapshot a catalog product at its default serving.
pub fn snapshot_item(food: &FoodItem) -> MealItem {
    let grams = parse_serving_grams(food.serving_size.as_deref());
    let factor = grams / 100.0;
    let n = &food.nutrients;

    MealItem {
        id: food.id.clone(),
        name: food.name.clone(),
        serving: format_grams(grams),
        calories: n.energy_kcal * factor,
        macros: MacroBreakdown {
            protein: n.protein,
            fat: n.fat,
            carbs: n.carbs,
            sugar: n.sugar,
            salt: n.salt,
        }
        .scaled(factor),
    }
}

/// Shrink an item's portion by `scale`, including the serving descriptor.
pub fn scale_item(item: &MealItem, scale: f64) -> MealItem {
    let grams = parse_serving_grams(Some(&item.serving));
    MealItem {
        id: item.id.clone(),
        name: item.name.clone(),
        serving: format_grams(grams * scale),
        calories: item.calories * scale,
        macros: item.macros.scaled(scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serving_grams() {
        assert_eq!(parse_serving_grams(Some("150g")), 150.0);
        assert_eq!(parse_serving_grams(Some(" 37.5 G ")), 37.5);
        assert_eq!(parse_serving_grams(Some("1 cup")), DEFAULT_SERVING_GRAMS);
        assert_eq!(parse_serving_grams(Some("g")), DEFAULT_SERVING_GRAMS);
        assert_eq!(parse_serving_grams(Some("-20g")), DEFAULT_SERVING_GRAMS);
        assert_eq!(parse_serving_grams(Some("0g")), 0.0);
        assert_eq!(parse_serving_grams(None), DEFAULT_SERVING_GRAMS);
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_grams(50.0), "50g");
        assert_eq!(format_grams(37.5), "37.5g");
    }

    #[test]
    fn test_snapshot_scales_by_serving() {
        let food = FoodItem::new("1", "Granola", 350.0)
            .with_serving("50g")
            .with_macros(10.0, 0.0, 60.0);
        let item = snapshot_item(&food);

        assert_eq!(item.serving, "50g");
        assert!((item.calories - 175.0).abs() < 1e-9);
        assert_eq!(item.macros.protein, Some(5.0));
        assert_eq!(item.macros.fat, Some(0.0));
        assert_eq!(item.macros.sugar, None);
    }

    #[test]
    fn test_snapshot_defaults_to_100g() {
        let food = FoodItem::new("2", "Pasta", 360.0).with_serving("a bowl");
        let item = snapshot_item(&food);
        assert_eq!(item.serving, "100g");
        assert!((item.calories - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_gram_serving_has_no_energy() {
        let food = FoodItem::new("4", "Sweetener", 400.0).with_serving("0g");
        let item = snapshot_item(&food);
        assert_eq!(item.serving, "0g");
        assert_eq!(item.calories, 0.0);
    }

    #[test]
    fn test_scale_item() {
        let food = FoodItem::new("3", "Rice", 130.0)
            .with_serving("200g")
            .with_macros(5.0, 0.5, 28.0);
        let scaled = scale_item(&snapshot_item(&food), 0.5);

        assert_eq!(scaled.serving, "100g");
        assert!((scaled.calories - 130.0).abs() < 1e-9);
        assert!((scaled.macros.carbs.unwrap() - 28.0).abs() < 1e-9);
    }
}
