//! Orders domain module.
//!
//! Order records, create-time validation and the merge patch applied by the
//! update path. Pure domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{CreateOrder, NewOrder, Order, OrderPatch, OrderStatus};
pub use shopfloor_core::OrderId;
