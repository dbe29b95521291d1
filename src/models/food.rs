use serde::{Deserialize, Serialize};

/// Nutrient values per 100 g of product.
///
/// Energy is always present; every other field is optional because catalog
/// sources frequently omit them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub energy_kcal: f64,

    #[serde(default)]
    pub protein: Option<f64>,

    #[serde(default)]
    pub fat: Option<f64>,

    #[serde(default)]
    pub carbs: Option<f64>,

    #[serde(default)]
    pub sugar: Option<f64>,

    #[serde(default)]
    pub salt: Option<f64>,
}

/// A catalog product with nutrient data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub brand: String,

    /// Per-100 g nutrient values.
    pub nutrients: Nutrients,

    /// Serving size as printed on the product, e.g. "150g".
    #[serde(default)]
    pub serving_size: Option<String>,
}

impl FoodItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, energy_kcal: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: String::new(),
            nutrients: Nutrients {
                energy_kcal,
                ..Default::default()
            },
            serving_size: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn with_serving(mut self, serving: impl Into<String>) -> Self {
        self.serving_size = Some(serving.into());
        self
    }

    pub fn with_macros(mut self, protein: f64, fat: f64, carbs: f64) -> Self {
        self.nutrients.protein = Some(protein);
        self.nutrients.fat = Some(fat);
        self.nutrients.carbs = Some(carbs);
        self
    }

    /// Lowercased identifier, brand, and name, matched one field at a time.
    pub fn search_fields(&self) -> [String; 3] {
        [
            self.id.to_lowercase(),
            self.brand.to_lowercase(),
            self.name.to_lowercase(),
        ]
    }

    /// Whether the identifier is purely numeric (barcode-like).
    pub fn is_numeric_id(id: &str) -> bool {
        !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{} ({}): {} kcal/100g, serving {:?}",
            self.name, self.id, self.nutrients.energy_kcal, self.serving_size
        )
    }
}
