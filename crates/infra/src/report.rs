//! Console dump of both stores (diagnostics).

use std::fmt;

use shopfloor_inventory::InventoryItem;
use shopfloor_orders::Order;

use crate::store::{InventoryStore, OrderStore, StoreResult};

/// Snapshot of both stores, rendered by its `Display` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub items: Vec<InventoryItem>,
    pub orders: Vec<Order>,
}

impl StoreReport {
    pub async fn capture<O, I>(orders: &O, inventory: &I) -> StoreResult<Self>
    where
        O: OrderStore + ?Sized,
        I: InventoryStore + ?Sized,
    {
        Ok(Self {
            items: inventory.list().await?,
            orders: orders.list().await?,
        })
    }
}

impl fmt::Display for StoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== CURRENT DATABASE STATUS ===")?;
        writeln!(f)?;
        writeln!(f, "INVENTORY TABLE:")?;
        writeln!(f, "Total items: {}", self.items.len())?;
        for item in &self.items {
            write!(
                f,
                "  - ID {}: {} (Stock: {}, Min: {})",
                item.id_typed(),
                item.item_name(),
                item.stock_qty(),
                item.min_threshold()
            )?;
            if item.is_low_stock() {
                write!(f, " [LOW]")?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;
        writeln!(f, "ORDERS TABLE:")?;
        writeln!(f, "Total orders: {}", self.orders.len())?;
        for order in &self.orders {
            writeln!(
                f,
                "  - ID {}: {} (Qty: {}, Status: {})",
                order.id_typed(),
                order.product_name(),
                order.quantity(),
                order.status()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shopfloor_core::{InventoryItemId, OrderId};
    use shopfloor_orders::OrderStatus;

    use super::*;

    #[test]
    fn renders_counts_and_rows() {
        let report = StoreReport {
            items: vec![
                InventoryItem::restore(InventoryItemId::new(1), "Laptop".into(), 20, 5, Some(Utc::now())),
                InventoryItem::restore(InventoryItemId::new(2), "Bolt".into(), 4, 10, None),
            ],
            orders: vec![Order::restore(
                OrderId::new(7),
                "Laptop".into(),
                2,
                OrderStatus::new("completed"),
                None,
            )],
        };

        let text = report.to_string();
        let expected = "\
=== CURRENT DATABASE STATUS ===

INVENTORY TABLE:
Total items: 2
  - ID 1: Laptop (Stock: 20, Min: 5)
  - ID 2: Bolt (Stock: 4, Min: 10) [LOW]

ORDERS TABLE:
Total orders: 1
  - ID 7: Laptop (Qty: 2, Status: completed)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_stores_render_zero_totals() {
        let report = StoreReport {
            items: vec![],
            orders: vec![],
        };
        let text = report.to_string();
        assert!(text.contains("Total items: 0"));
        assert!(text.contains("Total orders: 0"));
    }
}
