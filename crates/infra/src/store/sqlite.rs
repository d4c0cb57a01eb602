//! SQLite-backed stores.
//!
//! Every operation is a single SQL statement, so each commits atomically on its
//! own. Partial updates are expressed as `COALESCE(?, column)`: a `NULL` bind
//! (field absent from the patch) keeps the stored value.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | no row for the id (`fetch_optional` → `None`, 0 rows affected) | `NotFound` |
//! | anything else (database, pool closed, decode, IO) | `Persistence` |

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use shopfloor_core::{InventoryItemId, OrderId, Patch};
use shopfloor_inventory::{InventoryItem, ItemPatch, NewItem};
use shopfloor_orders::{NewOrder, Order, OrderPatch, OrderStatus};

use super::{InventoryStore, OrderStore, StoreError, StoreResult};

const CREATE_ORDERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name TEXT    NOT NULL,
        quantity     INTEGER NOT NULL,
        status       TEXT    NOT NULL DEFAULT 'pending',
        created_at   TEXT    NULL
    )
"#;

const CREATE_INVENTORY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        item_name     TEXT    NOT NULL,
        stock_qty     INTEGER NOT NULL,
        min_threshold INTEGER NOT NULL DEFAULT 0,
        updated_at    TEXT    NULL
    )
"#;

/// Open a pool for `database_url` and make sure both tables exist.
///
/// `sqlite::memory:` pools are pinned to one connection that never expires;
/// otherwise each new connection would see its own empty database. File
/// databases run in WAL mode so concurrent writers do not fail.
pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| map_sqlx_error("connect", e))?
        .create_if_missing(true);

    let (options, pool_options) = if is_in_memory(database_url) {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        // WAL: writers on different pool connections queue on the busy
        // timeout instead of failing with "database is locked".
        let options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        let pool_options = SqlitePoolOptions::new().max_connections(max_connections.max(1));
        (options, pool_options)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Fresh, isolated in-memory database (one per call).
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    connect("sqlite::memory:", 1).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the tables if they are missing. Idempotent.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    for ddl in [CREATE_ORDERS_TABLE, CREATE_INVENTORY_TABLE] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("init_schema", e))?;
    }
    Ok(())
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::persistence(
            operation,
            format!("database error: {}", db_err.message()),
        ),
        sqlx::Error::PoolClosed => StoreError::persistence(operation, "connection pool closed"),
        sqlx::Error::PoolTimedOut => {
            StoreError::persistence(operation, "timed out acquiring a connection")
        }
        other => StoreError::persistence(operation, other.to_string()),
    }
}

async fn ping_pool(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| map_sqlx_error("ping", e))?;
    Ok(())
}

fn order_from_row(row: &SqliteRow) -> Result<Order, sqlx::Error> {
    Ok(Order::restore(
        OrderId::new(row.try_get("id")?),
        row.try_get("product_name")?,
        row.try_get("quantity")?,
        OrderStatus::new(row.try_get::<String, _>("status")?),
        row.try_get::<Option<DateTime<Utc>>, _>("created_at")?,
    ))
}

fn item_from_row(row: &SqliteRow) -> Result<InventoryItem, sqlx::Error> {
    Ok(InventoryItem::restore(
        InventoryItemId::new(row.try_get("id")?),
        row.try_get("item_name")?,
        row.try_get("stock_qty")?,
        row.try_get("min_threshold")?,
        row.try_get::<Option<DateTime<Utc>>, _>("updated_at")?,
    ))
}

/// SQLite-backed order store (`orders` table).
#[derive(Debug, Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Wrap an existing pool. The schema must already exist (see [`connect`]).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrderStore for SqliteOrderStore {
    #[instrument(skip(self), fields(operation = "list_orders"))]
    async fn list(&self) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_name, quantity, status, created_at
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_orders", e))?;

        rows.iter()
            .map(order_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_orders", e))
    }

    #[instrument(skip(self), fields(operation = "get_order"))]
    async fn get(&self, id: OrderId) -> StoreResult<Order> {
        let row = sqlx::query(
            r#"
            SELECT id, product_name, quantity, status, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_order", e))?
        .ok_or_else(|| StoreError::order_not_found(id))?;

        order_from_row(&row).map_err(|e| map_sqlx_error("get_order", e))
    }

    #[instrument(skip(self, new), fields(operation = "create_order"))]
    async fn create(&self, new: NewOrder) -> StoreResult<Order> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (product_name, quantity, status, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&new.product_name)
        .bind(new.quantity)
        .bind(OrderStatus::PENDING)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_order", e))?;

        Ok(Order::create(OrderId::new(id), new, now))
    }

    #[instrument(skip(self, patch), fields(operation = "update_order"))]
    async fn update(&self, id: OrderId, patch: OrderPatch) -> StoreResult<Order> {
        let row = sqlx::query(
            r#"
            UPDATE orders
            SET status       = COALESCE(?2, status),
                product_name = COALESCE(?3, product_name),
                quantity     = COALESCE(?4, quantity)
            WHERE id = ?1
            RETURNING id, product_name, quantity, status, created_at
            "#,
        )
        .bind(id.get())
        .bind(patch.status.as_ref().map(|s| s.as_str()))
        .bind(patch.product_name.as_deref())
        .bind(patch.quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_order", e))?
        .ok_or_else(|| StoreError::order_not_found(id))?;

        order_from_row(&row).map_err(|e| map_sqlx_error("update_order", e))
    }

    #[instrument(skip(self), fields(operation = "delete_order"))]
    async fn delete(&self, id: OrderId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_order", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::order_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "clear_orders"))]
    async fn clear(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM orders")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear_orders", e))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        ping_pool(&self.pool).await
    }
}

/// SQLite-backed inventory store (`inventory` table).
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

impl SqliteInventoryStore {
    /// Wrap an existing pool. The schema must already exist (see [`connect`]).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl InventoryStore for SqliteInventoryStore {
    #[instrument(skip(self), fields(operation = "list_inventory"))]
    async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_name, stock_qty, min_threshold, updated_at
            FROM inventory
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_inventory", e))?;

        rows.iter()
            .map(item_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_inventory", e))
    }

    #[instrument(skip(self), fields(operation = "get_inventory_item"))]
    async fn get(&self, id: InventoryItemId) -> StoreResult<InventoryItem> {
        let row = sqlx::query(
            r#"
            SELECT id, item_name, stock_qty, min_threshold, updated_at
            FROM inventory
            WHERE id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_inventory_item", e))?
        .ok_or_else(|| StoreError::item_not_found(id))?;

        item_from_row(&row).map_err(|e| map_sqlx_error("get_inventory_item", e))
    }

    #[instrument(skip(self, new), fields(operation = "create_inventory_item"))]
    async fn create(&self, new: NewItem) -> StoreResult<InventoryItem> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO inventory (item_name, stock_qty, min_threshold, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&new.item_name)
        .bind(new.stock_qty)
        .bind(new.min_threshold)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_inventory_item", e))?;

        Ok(InventoryItem::create(InventoryItemId::new(id), new, now))
    }

    #[instrument(skip(self, patch), fields(operation = "update_inventory_item"))]
    async fn update(&self, id: InventoryItemId, patch: ItemPatch) -> StoreResult<InventoryItem> {
        // Only a patch that carries a field refreshes the timestamp.
        let touched_at: Option<DateTime<Utc>> = (!patch.is_empty()).then(Utc::now);

        let row = sqlx::query(
            r#"
            UPDATE inventory
            SET item_name     = COALESCE(?2, item_name),
                stock_qty     = COALESCE(?3, stock_qty),
                min_threshold = COALESCE(?4, min_threshold),
                updated_at    = COALESCE(?5, updated_at)
            WHERE id = ?1
            RETURNING id, item_name, stock_qty, min_threshold, updated_at
            "#,
        )
        .bind(id.get())
        .bind(patch.item_name.as_deref())
        .bind(patch.stock_qty)
        .bind(patch.min_threshold)
        .bind(touched_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_inventory_item", e))?
        .ok_or_else(|| StoreError::item_not_found(id))?;

        item_from_row(&row).map_err(|e| map_sqlx_error("update_inventory_item", e))
    }

    #[instrument(skip(self), fields(operation = "delete_inventory_item"))]
    async fn delete(&self, id: InventoryItemId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = ?1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_inventory_item", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::item_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(operation = "clear_inventory"))]
    async fn clear(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM inventory")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear_inventory", e))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> StoreResult<()> {
        ping_pool(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:shop?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://shopfloor.db"));
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();
        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn timestamps_survive_the_round_trip() {
        let pool = connect_in_memory().await.unwrap();
        let store = SqliteInventoryStore::new(pool);

        let created = store.create(NewItem::new("Bolt", 4, 10)).await.unwrap();
        let fetched = store.get(created.id_typed()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn rows_written_by_other_tools_may_lack_timestamps() {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("INSERT INTO orders (product_name, quantity, status) VALUES ('Gear', 1, 'pending')")
            .execute(&pool)
            .await
            .unwrap();

        let store = SqliteOrderStore::new(pool);
        let orders = store.list().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].created_at(), None);
    }

    #[tokio::test]
    async fn file_databases_use_wal() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("wal.db").display());
        let pool = connect(&url, 2).await.unwrap();

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(mode.to_ascii_lowercase(), "wal");
        pool.close().await;
    }

    #[tokio::test]
    async fn closed_pool_surfaces_as_persistence_error() {
        let pool = connect_in_memory().await.unwrap();
        pool.close().await;

        let store = SqliteOrderStore::new(pool);
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Persistence { operation: "list_orders", .. }));
        assert!(store.ping().await.is_err());
    }
}
