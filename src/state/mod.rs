mod catalog;
mod persistence;
mod store;

pub use catalog::{DiscoveryFilters, LocalCatalog, ProductCatalog};
pub use persistence::{load_products, save_products};
pub use store::{JsonPlanStore, MemoryPlanStore, PlanStore};
