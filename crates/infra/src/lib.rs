//! Infrastructure layer: record stores, the summary read path, configuration,
//! and the seeding / diagnostic utilities.

pub mod config;
pub mod report;
pub mod seed;
pub mod store;
pub mod summary;


pub use config::{AppConfig, ConfigError};
pub use store::{InventoryStore, OrderStore, StoreError, StoreResult};
pub use summary::{Summary, SummaryAggregator};
