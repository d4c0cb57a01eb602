use std::sync::Arc;

use anyhow::Context;

use shopfloor_infra::store::sqlite;
use shopfloor_infra::store::{
    InMemoryInventoryStore, InMemoryOrderStore, SqliteInventoryStore, SqliteOrderStore,
};
use shopfloor_infra::{AppConfig, InventoryStore, OrderStore, StoreResult, SummaryAggregator};

pub type SharedOrderStore = Arc<dyn OrderStore>;
pub type SharedInventoryStore = Arc<dyn InventoryStore>;

/// Store handles shared by every handler (one `Arc<AppServices>` extension).
pub struct AppServices {
    pub orders: SharedOrderStore,
    pub inventory: SharedInventoryStore,
    pub summary: SummaryAggregator<SharedOrderStore, SharedInventoryStore>,
}

impl AppServices {
    pub fn new(orders: SharedOrderStore, inventory: SharedInventoryStore) -> Self {
        let summary = SummaryAggregator::new(orders.clone(), inventory.clone());
        Self {
            orders,
            inventory,
            summary,
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(InMemoryInventoryStore::new()),
        )
    }

    /// Both stores reachable.
    pub async fn ready(&self) -> StoreResult<()> {
        self.orders.ping().await?;
        self.inventory.ping().await
    }
}

/// Wire the stores selected by `config`.
///
/// Persistent mode opens (and if needed creates) the SQLite database named by
/// `DATABASE_URL`; `USE_PERSISTENT_STORES=false` selects the in-memory stores.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    if !config.use_persistent_stores {
        tracing::info!("using in-memory stores");
        return Ok(AppServices::in_memory());
    }

    let pool = sqlite::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    tracing::info!(database_url = %config.database_url, "using sqlite stores");

    Ok(AppServices::new(
        Arc::new(SqliteOrderStore::new(pool.clone())),
        Arc::new(SqliteInventoryStore::new(pool)),
    ))
}
