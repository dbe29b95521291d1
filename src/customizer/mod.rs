pub mod idempotency;
pub mod operations;

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::{ChangeLogEntry, CustomizationRequest, DailyPlan, FoodItem};
use crate::state::ProductCatalog;

pub use idempotency::check_idempotency;
pub use operations::{apply_customization, combine_servings, recompute_plan};

/// Applies customization requests to existing plans.
pub struct PlanCustomizer {
    catalog: Arc<dyn ProductCatalog>,
}

impl PlanCustomizer {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Customize a copy of `plan`. The original is left untouched.
    ///
    /// The swap replacement is resolved from the catalog first; the
    /// mutations themselves run synchronously on the working copy. Only
    /// catalog I/O failures are returned as errors.
    pub async fn customize(
        &self,
        plan: &DailyPlan,
        request: &CustomizationRequest,
    ) -> Result<(DailyPlan, Vec<ChangeLogEntry>)> {
        let replacement = match &request.swap {
            Some(swap) if plan.locate_item(&swap.old_id).is_some() => {
                self.resolve_product(&swap.new_id).await?
            }
            _ => None,
        };

        Ok(apply_customization(plan, request, replacement.as_ref()))
    }

    /// Catalog lookup by id, falling back to name search for non-numeric ids.
    pub async fn resolve_product(&self, id: &str) -> Result<Option<FoodItem>> {
        if let Some(item) = self.catalog.find(id).await? {
            return Ok(Some(item));
        }
        if FoodItem::is_numeric_id(id) {
            debug!("Product {} not found by id", id);
            return Ok(None);
        }
        self.catalog.find_by_name(id).await
    }

    pub fn check_idempotency(&self, plan: &DailyPlan, request: &CustomizationRequest) -> bool {
        check_idempotency(plan, request)
    }
}
