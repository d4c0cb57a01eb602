use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfloor_core::error::require;
use shopfloor_core::{merge_field, DomainResult, Entity, InventoryItemId, Patch};

/// Low-stock rule: strictly below the threshold.
///
/// An item sitting exactly at its threshold is not low.
pub fn is_low_stock(stock_qty: i64, min_threshold: i64) -> bool {
    stock_qty < min_threshold
}

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    id: InventoryItemId,
    item_name: String,
    stock_qty: i64,
    min_threshold: i64,
    updated_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    pub fn create(id: InventoryItemId, new: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            item_name: new.item_name,
            stock_qty: new.stock_qty,
            min_threshold: new.min_threshold,
            updated_at: Some(now),
        }
    }

    /// Rehydrate an item from storage as-is.
    pub fn restore(
        id: InventoryItemId,
        item_name: String,
        stock_qty: i64,
        min_threshold: i64,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            item_name,
            stock_qty,
            min_threshold,
            updated_at,
        }
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn stock_qty(&self) -> i64 {
        self.stock_qty
    }

    pub fn min_threshold(&self) -> i64 {
        self.min_threshold
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self.stock_qty, self.min_threshold)
    }

    /// Merge `patch` and stamp `updated_at` when it carried any field.
    ///
    /// Returns whether the record was touched. An empty patch leaves the item
    /// (timestamp included) unchanged.
    pub fn update(&mut self, patch: ItemPatch, now: DateTime<Utc>) -> bool {
        if patch.is_empty() {
            return false;
        }
        patch.apply_to(self);
        self.updated_at = Some(now);
        true
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> InventoryItemId {
        self.id
    }
}

/// Create request as received: every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateItem {
    pub item_name: Option<String>,
    pub stock_qty: Option<i64>,
    pub min_threshold: Option<i64>,
}

impl CreateItem {
    /// `item_name` and `stock_qty` are required; `min_threshold` defaults to 0.
    pub fn validate(self) -> DomainResult<NewItem> {
        Ok(NewItem {
            item_name: require(self.item_name, "item_name")?,
            stock_qty: require(self.stock_qty, "stock_qty")?,
            min_threshold: self.min_threshold.unwrap_or(0),
        })
    }
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub item_name: String,
    pub stock_qty: i64,
    pub min_threshold: i64,
}

impl NewItem {
    pub fn new(item_name: impl Into<String>, stock_qty: i64, min_threshold: i64) -> Self {
        Self {
            item_name: item_name.into(),
            stock_qty,
            min_threshold,
        }
    }
}

/// Partial update for an inventory item. No bounds are checked: negative stock
/// or thresholds are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    pub item_name: Option<String>,
    pub stock_qty: Option<i64>,
    pub min_threshold: Option<i64>,
}

impl ItemPatch {
    pub fn stock_qty(stock_qty: i64) -> Self {
        Self {
            stock_qty: Some(stock_qty),
            ..Self::default()
        }
    }
}

impl Patch<InventoryItem> for ItemPatch {
    fn is_empty(&self) -> bool {
        self.item_name.is_none() && self.stock_qty.is_none() && self.min_threshold.is_none()
    }

    fn apply_to(self, target: &mut InventoryItem) {
        merge_field(&mut target.item_name, self.item_name);
        merge_field(&mut target.stock_qty, self.stock_qty);
        merge_field(&mut target.min_threshold, self.min_threshold);
    }
}
