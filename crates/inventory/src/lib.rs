//! Inventory domain module.
//!
//! Stock records, create-time validation, the merge patch and the low-stock
//! rule. Pure domain logic (no IO, no HTTP, no storage).

pub mod item;

pub use item::{is_low_stock, CreateItem, InventoryItem, ItemPatch, NewItem};
pub use shopfloor_core::InventoryItemId;
