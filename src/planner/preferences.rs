use crate::models::{DietaryRestriction, FoodItem, Preferences};
use crate::planner::constants::{ANIMAL_PRODUCT_KEYWORDS, MEAT_KEYWORDS};

/// Whether `item` is allowed under `prefs`.
///
/// Rejects when the id, brand or name on its own contains an `exclude`
/// substring (case-insensitive), then on the keyword lists implied by the
/// dietary restrictions. Fields are never joined, so a match cannot span two.
pub fn matches(item: &FoodItem, prefs: &Preferences) -> bool {
    let fields = item.search_fields();

    let excluded = prefs
        .exclude
        .iter()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .any(|e| fields.iter().any(|f| f.contains(&e)));
    if excluded {
        return false;
    }

    prefs
        .dietary_restrictions
        .iter()
        .all(|restriction| satisfies_restriction(&fields, restriction))
}

fn satisfies_restriction(fields: &[String], restriction: &DietaryRestriction) -> bool {
    match restriction {
        DietaryRestriction::Vegetarian => !contains_any(fields, MEAT_KEYWORDS),
        DietaryRestriction::Vegan => {
            !contains_any(fields, MEAT_KEYWORDS) && !contains_any(fields, ANIMAL_PRODUCT_KEYWORDS)
        }
        DietaryRestriction::Other(_) => true,
    }
}

fn contains_any(fields: &[String], keywords: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| keywords.iter().any(|k| field.contains(k)))
}
