//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stored records implement this so generic storage (e.g. the in-memory tables)
/// can key them without knowing the concrete record type.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Ord + core::fmt::Debug + Into<i64> + From<i64>;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
