//! Fixed sample data for demos.
//!
//! Seeding goes through the public store operations only: orders are created
//! (always pending) and then moved to their sample status with an update.

use shopfloor_inventory::NewItem;
use shopfloor_orders::{NewOrder, OrderPatch, OrderStatus};

use crate::store::{InventoryStore, OrderStore, StoreResult};

/// `(item_name, stock_qty, min_threshold)`
pub const SAMPLE_INVENTORY: &[(&str, i64, i64)] = &[
    ("Laptop", 20, 5),
    ("Mobile Phone", 50, 10),
    ("Headphones", 100, 20),
    ("Keyboard", 40, 10),
    ("Mouse", 60, 15),
];

/// `(product_name, quantity, status)`
pub const SAMPLE_ORDERS: &[(&str, i64, &str)] = &[
    ("Laptop", 2, "pending"),
    ("Mobile Phone", 1, "completed"),
    ("Headphones", 3, "processing"),
    ("Keyboard", 5, "pending"),
    ("Mouse", 4, "cancelled"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub orders_removed: u64,
    pub items_removed: u64,
    pub orders_inserted: u64,
    pub items_inserted: u64,
}

/// Replace the contents of both stores with the sample rows.
pub async fn seed_sample_data<O, I>(orders: &O, inventory: &I) -> StoreResult<SeedReport>
where
    O: OrderStore + ?Sized,
    I: InventoryStore + ?Sized,
{
    let mut report = SeedReport {
        items_removed: inventory.clear().await?,
        orders_removed: orders.clear().await?,
        ..SeedReport::default()
    };

    for (item_name, stock_qty, min_threshold) in SAMPLE_INVENTORY {
        inventory
            .create(NewItem::new(*item_name, *stock_qty, *min_threshold))
            .await?;
        report.items_inserted += 1;
    }

    for (product_name, quantity, status) in SAMPLE_ORDERS {
        let order = orders.create(NewOrder::new(*product_name, *quantity)).await?;
        if *status != OrderStatus::PENDING {
            orders
                .update(order.id_typed(), OrderPatch::status(*status))
                .await?;
        }
        report.orders_inserted += 1;
    }

    tracing::info!(
        orders = report.orders_inserted,
        items = report.items_inserted,
        "sample data seeded"
    );
    Ok(report)
}
