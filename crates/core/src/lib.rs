//! `shopfloor-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, integer record identifiers, and the merge helper used by
//! every partial update.

pub mod entity;
pub mod error;
pub mod id;
pub mod patch;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, OrderId};
pub use patch::{merge_field, Patch};
