use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use strsim::jaro_winkler;
use tracing::debug;

use crate::error::Result;
use crate::models::FoodItem;
use crate::planner::constants::FUZZY_NAME_THRESHOLD;
use crate::state::persistence::load_products;

/// Filters for bulk product discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilters {
    /// Identifiers the caller already holds.
    pub exclude_ids: Vec<String>,

    /// Case-insensitive substring the product name must contain.
    pub name_contains: Option<String>,
}

/// Source of nutrient-annotated products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Look up a product by identifier.
    async fn find(&self, id: &str) -> Result<Option<FoodItem>>;

    /// Look up the best product for a name fragment.
    async fn find_by_name(&self, fragment: &str) -> Result<Option<FoodItem>>;

    /// Bulk listing for plan generation.
    async fn discover(&self, filters: &DiscoveryFilters, max_items: usize) -> Result<Vec<FoodItem>>;
}

/// In-memory catalog keyed by product identifier.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    products: BTreeMap<String, FoodItem>,
}

impl LocalCatalog {
    /// Build from a product list; later duplicates replace earlier ones.
    pub fn new(products: Vec<FoodItem>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Self { products }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(load_products(path)?))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Substring match first, then the closest Jaro-Winkler match.
    fn best_name_match(&self, fragment: &str) -> Option<&FoodItem> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(hit) = self
            .products
            .values()
            .find(|p| p.name.to_lowercase().contains(&needle))
        {
            return Some(hit);
        }

        self.products
            .values()
            .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &needle)))
            .filter(|(_, score)| *score > FUZZY_NAME_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, score)| {
                debug!("Fuzzy match '{}' -> '{}' ({:.2})", fragment, p.name, score);
                p
            })
    }
}

#[async_trait]
impl ProductCatalog for LocalCatalog {
    async fn find(&self, id: &str) -> Result<Option<FoodItem>> {
        Ok(self.products.get(id).cloned())
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Option<FoodItem>> {
        Ok(self.best_name_match(fragment).cloned())
    }

    async fn discover(&self, filters: &DiscoveryFilters, max_items: usize) -> Result<Vec<FoodItem>> {
        let name_filter = filters.name_contains.as_ref().map(|n| n.to_lowercase());

        Ok(self
            .products
            .values()
            .filter(|p| !filters.exclude_ids.contains(&p.id))
            .filter(|p| {
                name_filter
                    .as_ref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .take(max_items)
            .cloned()
            .collect())
    }
}
