//! Merge semantics for partial updates.
//!
//! A patch is a struct of `Option` fields: `Some` overwrites, `None` keeps the
//! prior value. Every record type funnels its update path through
//! [`merge_field`], so there is exactly one definition of "merge".

/// Overwrite `slot` with `value` when present.
///
/// Returns `true` if a value was supplied (even if equal to the current one).
pub fn merge_field<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// A partial update applicable to a record of type `T`.
pub trait Patch<T> {
    /// True when no field is supplied (applying it is a no-op).
    fn is_empty(&self) -> bool;

    /// Merge the supplied fields into `target`, leaving the rest untouched.
    fn apply_to(self, target: &mut T);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn none_keeps_prior_value() {
        let mut slot = String::from("pending");
        assert!(!merge_field(&mut slot, None));
        assert_eq!(slot, "pending");
    }

    #[test]
    fn some_overwrites_even_with_equal_value() {
        let mut slot = 3_i64;
        assert!(merge_field(&mut slot, Some(3)));
        assert_eq!(slot, 3);
    }

    proptest! {
        #[test]
        fn result_is_the_supplied_value_or_the_prior_one(prior in any::<i64>(), value in any::<Option<i64>>()) {
            let mut slot = prior;
            let touched = merge_field(&mut slot, value);
            prop_assert_eq!(touched, value.is_some());
            prop_assert_eq!(slot, value.unwrap_or(prior));
        }
    }
}
