//! Dashboard counters derived from both stores.

use serde::Serialize;

use shopfloor_inventory::InventoryItem;
use shopfloor_orders::Order;

use crate::store::{InventoryStore, OrderStore, StoreResult};

/// Summary counters. Always computed fresh; never cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_orders: u64,
    pub pending_orders: u64,
    pub low_stock_items: u64,
}

impl Summary {
    /// Count over full snapshots of both collections.
    pub fn compute(orders: &[Order], items: &[InventoryItem]) -> Self {
        Self {
            total_orders: orders.len() as u64,
            pending_orders: orders.iter().filter(|o| o.is_pending()).count() as u64,
            low_stock_items: items.iter().filter(|i| i.is_low_stock()).count() as u64,
        }
    }
}

/// Read-only aggregator over an order store and an inventory store.
///
/// Holds no state besides the store handles; each call scans both stores.
#[derive(Debug, Clone)]
pub struct SummaryAggregator<O, I> {
    orders: O,
    inventory: I,
}

impl<O, I> SummaryAggregator<O, I>
where
    O: OrderStore,
    I: InventoryStore,
{
    pub fn new(orders: O, inventory: I) -> Self {
        Self { orders, inventory }
    }

    pub async fn summary(&self) -> StoreResult<Summary> {
        let orders = self.orders.list().await?;
        let items = self.inventory.list().await?;
        Ok(Summary::compute(&orders, &items))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use shopfloor_core::{InventoryItemId, OrderId};
    use shopfloor_inventory::{ItemPatch, NewItem};
    use shopfloor_orders::{NewOrder, OrderPatch, OrderStatus};

    use super::*;
    use crate::store::{InMemoryInventoryStore, InMemoryOrderStore};

    fn order(id: i64, status: &str) -> Order {
        Order::restore(
            OrderId::new(id),
            "Widget".into(),
            1,
            OrderStatus::new(status),
            Some(Utc::now()),
        )
    }

    fn item(id: i64, stock_qty: i64, min_threshold: i64) -> InventoryItem {
        InventoryItem::restore(
            InventoryItemId::new(id),
            "Bolt".into(),
            stock_qty,
            min_threshold,
            Some(Utc::now()),
        )
    }

    #[test]
    fn empty_stores_yield_zeroes() {
        assert_eq!(Summary::compute(&[], &[]), Summary::default());
    }

    #[test]
    fn pending_count_is_literal_and_case_sensitive() {
        let orders = vec![
            order(1, "pending"),
            order(2, "Pending"),
            order(3, "processing"),
            order(4, "pending "),
            order(5, "pending"),
        ];
        let summary = Summary::compute(&orders, &[]);
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.pending_orders, 2);
    }

    #[test]
    fn low_stock_count_uses_strict_inequality() {
        let items = vec![item(1, 5, 10), item(2, 10, 10), item(3, 11, 10), item(4, 0, 1)];
        assert_eq!(Summary::compute(&[], &items).low_stock_items, 2);
    }

    #[test]
    fn serializes_counter_names() {
        let json = serde_json::to_value(Summary {
            total_orders: 3,
            pending_orders: 1,
            low_stock_items: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "total_orders": 3, "pending_orders": 1, "low_stock_items": 2 })
        );
    }

    #[tokio::test]
    async fn aggregator_reflects_every_mutation() {
        let orders = Arc::new(InMemoryOrderStore::new());
        let inventory = Arc::new(InMemoryInventoryStore::new());
        let aggregator = SummaryAggregator::new(orders.clone(), inventory.clone());

        let widget = orders.create(NewOrder::new("Widget", 3)).await.unwrap();
        let bolt = inventory.create(NewItem::new("Bolt", 4, 10)).await.unwrap();
        let s = aggregator.summary().await.unwrap();
        assert_eq!((s.total_orders, s.pending_orders, s.low_stock_items), (1, 1, 1));

        orders
            .update(widget.id_typed(), OrderPatch::status("completed"))
            .await
            .unwrap();
        inventory
            .update(bolt.id_typed(), ItemPatch::stock_qty(20))
            .await
            .unwrap();
        let s = aggregator.summary().await.unwrap();
        assert_eq!((s.total_orders, s.pending_orders, s.low_stock_items), (1, 0, 0));

        orders.delete(widget.id_typed()).await.unwrap();
        assert_eq!(aggregator.summary().await.unwrap().total_orders, 0);
    }
}
