use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{PlanError, Result};
use crate::models::DailyPlan;

/// Persistence for generated plans.
///
/// Implementations do not serialize concurrent writers of the same id;
/// callers own that policy.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn load(&self, plan_id: &str) -> Result<Option<DailyPlan>>;

    /// Returns whether the plan was written.
    async fn save(&self, plan_id: &str, plan: &DailyPlan) -> Result<bool>;
}

/// One pretty-printed JSON file per plan under a directory.
#[derive(Debug, Clone)]
pub struct JsonPlanStore {
    dir: PathBuf,
}

impl JsonPlanStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn plan_path(&self, plan_id: &str) -> Result<PathBuf> {
        let valid = !plan_id.is_empty()
            && plan_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PlanError::InvalidInput(format!("invalid plan id '{}'", plan_id)));
        }
        Ok(self.dir.join(format!("{}.json", plan_id)))
    }
}

#[async_trait]
impl PlanStore for JsonPlanStore {
    async fn load(&self, plan_id: &str) -> Result<Option<DailyPlan>> {
        let path = self.plan_path(plan_id)?;
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save(&self, plan_id: &str, plan: &DailyPlan) -> Result<bool> {
        let path = self.plan_path(plan_id)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(plan)?;
        tokio::fs::write(&path, json).await?;
        debug!("Saved plan {} to {}", plan_id, path.display());
        Ok(true)
    }
}

/// Plans held in memory.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: RwLock<HashMap<String, DailyPlan>>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn load(&self, plan_id: &str) -> Result<Option<DailyPlan>> {
        Ok(self.plans.read().await.get(plan_id).cloned())
    }

    async fn save(&self, plan_id: &str, plan: &DailyPlan) -> Result<bool> {
        self.plans
            .write()
            .await
            .insert(plan_id.to_string(), plan.clone());
        Ok(true)
    }
}
