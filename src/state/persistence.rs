use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::models::{FoodItem, Nutrients};

/// Flat CSV row; one product per line.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: String,
    name: String,
    #[serde(default)]
    brand: String,
    energy_kcal: f64,
    protein: Option<f64>,
    fat: Option<f64>,
    carbs: Option<f64>,
    sugar: Option<f64>,
    salt: Option<f64>,
    serving_size: Option<String>,
}

impl From<ProductRow> for FoodItem {
    fn from(row: ProductRow) -> Self {
        FoodItem {
            id: row.id,
            name: row.name,
            brand: row.brand,
            nutrients: Nutrients {
                energy_kcal: row.energy_kcal,
                protein: row.protein,
                fat: row.fat,
                carbs: row.carbs,
                sugar: row.sugar,
                salt: row.salt,
            },
            serving_size: row.serving_size.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Load products from a `.csv` or JSON file.
///
/// Deduplicates by identifier (last occurrence wins).
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<FoodItem>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let products: Vec<FoodItem> = if is_csv {
        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize::<ProductRow>() {
            rows.push(row?.into());
        }
        rows
    } else {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)?
    };

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashMap<String, FoodItem> = HashMap::new();
    for product in products {
        if !seen.contains_key(&product.id) {
            order.push(product.id.clone());
        }
        seen.insert(product.id.clone(), product);
    }

    Ok(order
        .into_iter()
        .filter_map(|id| seen.remove(&id))
        .collect())
}

/// Save products to a JSON file.
pub fn save_products<P: AsRef<Path>>(path: P, products: &[FoodItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(products)?;
    fs::write(path, json)?;
    Ok(())
}
