//! Record stores for orders and inventory.
//!
//! Each store is a trait with two backends: in-memory tables for tests/dev and
//! SQLite for the running service. Stores own their persistence handle; nothing
//! here is a process-wide singleton.

use std::sync::Arc;

use thiserror::Error;

use shopfloor_core::{InventoryItemId, OrderId};
use shopfloor_inventory::{InventoryItem, ItemPatch, NewItem};
use shopfloor_orders::{NewOrder, Order, OrderPatch};

pub mod in_memory;
pub mod sqlite;

pub use in_memory::{InMemoryInventoryStore, InMemoryOrderStore, InMemoryTable};
pub use sqlite::{SqliteInventoryStore, SqliteOrderStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// Validation failures never reach a store: create operations take already
/// validated input (`NewOrder`, `NewItem`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced record does not exist. Nothing was changed.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The backing store failed (connection, SQL, poisoned lock). Not retried.
    #[error("persistence error in {operation}: {message}")]
    Persistence {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn order_not_found(id: OrderId) -> Self {
        Self::NotFound {
            entity: "order",
            id: id.get(),
        }
    }

    pub fn item_not_found(id: InventoryItemId) -> Self {
        Self::NotFound {
            entity: "inventory item",
            id: id.get(),
        }
    }

    pub fn persistence(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Persistence {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Durable collection of orders.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, ascending by id.
    async fn list(&self) -> StoreResult<Vec<Order>>;

    async fn get(&self, id: OrderId) -> StoreResult<Order>;

    /// Persist a new order with a fresh id, status `"pending"` and `created_at = now`.
    async fn create(&self, new: NewOrder) -> StoreResult<Order>;

    /// Merge `patch` into the stored order. `created_at` is never touched.
    async fn update(&self, id: OrderId, patch: OrderPatch) -> StoreResult<Order>;

    /// Hard delete.
    async fn delete(&self, id: OrderId) -> StoreResult<()>;

    /// Remove every order, returning how many were removed. Ids are not recycled.
    async fn clear(&self) -> StoreResult<u64>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Durable collection of inventory items.
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, ascending by id.
    async fn list(&self) -> StoreResult<Vec<InventoryItem>>;

    async fn get(&self, id: InventoryItemId) -> StoreResult<InventoryItem>;

    /// Persist a new item with a fresh id and `updated_at = now`.
    async fn create(&self, new: NewItem) -> StoreResult<InventoryItem>;

    /// Merge `patch` into the stored item; `updated_at` is refreshed when the
    /// patch carries at least one field.
    async fn update(&self, id: InventoryItemId, patch: ItemPatch) -> StoreResult<InventoryItem>;

    /// Hard delete.
    async fn delete(&self, id: InventoryItemId) -> StoreResult<()>;

    /// Remove every item, returning how many were removed. Ids are not recycled.
    async fn clear(&self) -> StoreResult<u64>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn list(&self) -> StoreResult<Vec<Order>> {
        (**self).list().await
    }

    async fn get(&self, id: OrderId) -> StoreResult<Order> {
        (**self).get(id).await
    }

    async fn create(&self, new: NewOrder) -> StoreResult<Order> {
        (**self).create(new).await
    }

    async fn update(&self, id: OrderId, patch: OrderPatch) -> StoreResult<Order> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: OrderId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn clear(&self) -> StoreResult<u64> {
        (**self).clear().await
    }

    async fn ping(&self) -> StoreResult<()> {
        (**self).ping().await
    }
}

#[async_trait::async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        (**self).list().await
    }

    async fn get(&self, id: InventoryItemId) -> StoreResult<InventoryItem> {
        (**self).get(id).await
    }

    async fn create(&self, new: NewItem) -> StoreResult<InventoryItem> {
        (**self).create(new).await
    }

    async fn update(&self, id: InventoryItemId, patch: ItemPatch) -> StoreResult<InventoryItem> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: InventoryItemId) -> StoreResult<()> {
        (**self).delete(id).await
    }

    async fn clear(&self) -> StoreResult<u64> {
        (**self).clear().await
    }

    async fn ping(&self) -> StoreResult<()> {
        (**self).ping().await
    }
}
