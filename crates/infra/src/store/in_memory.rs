use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use shopfloor_core::{Entity, InventoryItemId, OrderId, Patch};
use shopfloor_inventory::{InventoryItem, ItemPatch, NewItem};
use shopfloor_orders::{NewOrder, Order, OrderPatch};

use super::{InventoryStore, OrderStore, StoreError, StoreResult};

#[derive(Debug)]
struct TableState<V: Entity> {
    rows: BTreeMap<V::Id, V>,
    last_id: i64,
}

/// In-memory table keyed by entity id, for tests/dev.
///
/// Ids come from a monotonic counter that is never rewound (not even by
/// [`InMemoryTable::clear`]), so deleted ids are never handed out again.
#[derive(Debug)]
pub struct InMemoryTable<V: Entity> {
    inner: RwLock<TableState<V>>,
}

impl<V: Entity> InMemoryTable<V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TableState {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<V: Entity> Default for InMemoryTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(operation: &'static str) -> StoreError {
    StoreError::persistence(operation, "table lock poisoned")
}

impl<V> InMemoryTable<V>
where
    V: Entity + Clone,
{
    pub fn list(&self) -> StoreResult<Vec<V>> {
        let state = self.inner.read().map_err(|_| poisoned("list"))?;
        Ok(state.rows.values().cloned().collect())
    }

    pub fn get(&self, id: V::Id) -> StoreResult<Option<V>> {
        let state = self.inner.read().map_err(|_| poisoned("get"))?;
        Ok(state.rows.get(&id).cloned())
    }

    /// Allocate the next id and insert the row built for it.
    pub fn insert_with(&self, build: impl FnOnce(V::Id) -> V) -> StoreResult<V> {
        let mut state = self.inner.write().map_err(|_| poisoned("insert"))?;
        state.last_id += 1;
        let row = build(<V::Id as From<i64>>::from(state.last_id));
        state.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    /// Mutate a row in place; `None` if it does not exist.
    pub fn modify(&self, id: V::Id, f: impl FnOnce(&mut V)) -> StoreResult<Option<V>> {
        let mut state = self.inner.write().map_err(|_| poisoned("modify"))?;
        Ok(state.rows.get_mut(&id).map(|row| {
            f(row);
            row.clone()
        }))
    }

    pub fn remove(&self, id: V::Id) -> StoreResult<bool> {
        let mut state = self.inner.write().map_err(|_| poisoned("remove"))?;
        Ok(state.rows.remove(&id).is_some())
    }

    pub fn clear(&self) -> StoreResult<u64> {
        let mut state = self.inner.write().map_err(|_| poisoned("clear"))?;
        let removed = state.rows.len() as u64;
        state.rows.clear();
        Ok(removed)
    }
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    table: InMemoryTable<Order>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn list(&self) -> StoreResult<Vec<Order>> {
        self.table.list()
    }

    async fn get(&self, id: OrderId) -> StoreResult<Order> {
        self.table.get(id)?.ok_or_else(|| StoreError::order_not_found(id))
    }

    async fn create(&self, new: NewOrder) -> StoreResult<Order> {
        let now = Utc::now();
        self.table.insert_with(|id| Order::create(id, new, now))
    }

    async fn update(&self, id: OrderId, patch: OrderPatch) -> StoreResult<Order> {
        self.table
            .modify(id, |order| patch.apply_to(order))?
            .ok_or_else(|| StoreError::order_not_found(id))
    }

    async fn delete(&self, id: OrderId) -> StoreResult<()> {
        if self.table.remove(id)? {
            Ok(())
        } else {
            Err(StoreError::order_not_found(id))
        }
    }

    async fn clear(&self) -> StoreResult<u64> {
        self.table.clear()
    }
}

/// In-memory inventory store.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    table: InMemoryTable<InventoryItem>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        self.table.list()
    }

    async fn get(&self, id: InventoryItemId) -> StoreResult<InventoryItem> {
        self.table.get(id)?.ok_or_else(|| StoreError::item_not_found(id))
    }

    async fn create(&self, new: NewItem) -> StoreResult<InventoryItem> {
        let now = Utc::now();
        self.table.insert_with(|id| InventoryItem::create(id, new, now))
    }

    async fn update(&self, id: InventoryItemId, patch: ItemPatch) -> StoreResult<InventoryItem> {
        let now = Utc::now();
        self.table
            .modify(id, |item| {
                item.update(patch, now);
            })?
            .ok_or_else(|| StoreError::item_not_found(id))
    }

    async fn delete(&self, id: InventoryItemId) -> StoreResult<()> {
        if self.table.remove(id)? {
            Ok(())
        } else {
            Err(StoreError::item_not_found(id))
        }
    }

    async fn clear(&self) -> StoreResult<u64> {
        self.table.clear()
    }
}
