use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopfloor_core::error::require;
use shopfloor_core::{merge_field, DomainResult, Entity, OrderId, Patch};

/// Order lifecycle label.
///
/// The set of labels is open-ended: callers may store any text (e.g.
/// `"processing"`, `"completed"`, `"cancelled"`). The only label with meaning to
/// this crate is [`OrderStatus::PENDING`], which every new order starts with and
/// which the summary counts by exact, case-sensitive match. No transition rules
/// are enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "pending";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn pending() -> Self {
        Self(Self::PENDING.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Literal match against `"pending"` (`"Pending"` does not count).
    pub fn is_pending(&self) -> bool {
        self.0 == Self::PENDING
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A stored order.
///
/// `id` and `created_at` are fixed at creation; the remaining fields change only
/// through [`OrderPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    product_name: String,
    quantity: i64,
    status: OrderStatus,
    created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a freshly created order: status is always `"pending"`.
    pub fn create(id: OrderId, new: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            product_name: new.product_name,
            quantity: new.quantity,
            status: OrderStatus::pending(),
            created_at: Some(created_at),
        }
    }

    /// Rehydrate an order from storage as-is.
    pub fn restore(
        id: OrderId,
        product_name: String,
        quantity: i64,
        status: OrderStatus,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            product_name,
            quantity,
            status,
            created_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Create request as received: every field may be absent.
///
/// A `status` in the incoming payload is not represented here at all; new
/// orders are always pending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateOrder {
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
}

impl CreateOrder {
    /// Check required fields, producing the input a store can persist.
    pub fn validate(self) -> DomainResult<NewOrder> {
        Ok(NewOrder {
            product_name: require(self.product_name, "product_name")?,
            quantity: require(self.quantity, "quantity")?,
        })
    }
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub product_name: String,
    pub quantity: i64,
}

impl NewOrder {
    pub fn new(product_name: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }
}

/// Partial update for an order. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
}

impl OrderPatch {
    pub fn status(status: impl Into<OrderStatus>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

impl Patch<Order> for OrderPatch {
    fn is_empty(&self) -> bool {
        self.status.is_none() && self.product_name.is_none() && self.quantity.is_none()
    }

    fn apply_to(self, target: &mut Order) {
        merge_field(&mut target.status, self.status);
        merge_field(&mut target.product_name, self.product_name);
        merge_field(&mut target.quantity, self.quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn widget() -> Order {
        Order::create(OrderId::new(1), NewOrder::new("Widget", 3), test_time())
    }

    #[test]
    fn create_forces_pending_status() {
        let order = widget();
        assert_eq!(order.status().as_str(), "pending");
        assert!(order.is_pending());
        assert!(order.created_at().is_some());
    }

    #[test]
    fn validate_rejects_missing_product_name() {
        let err = CreateOrder {
            product_name: None,
            quantity: Some(1),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "validation failed: product_name is required");
    }

    #[test]
    fn validate_rejects_missing_quantity() {
        let err = CreateOrder {
            product_name: Some("Widget".into()),
            quantity: None,
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn incoming_status_is_ignored_on_create() {
        let req: CreateOrder = serde_json::from_value(serde_json::json!({
            "product_name": "Widget",
            "quantity": 3,
            "status": "completed",
        }))
        .unwrap();
        let order = Order::create(OrderId::new(9), req.validate().unwrap(), test_time());
        assert!(order.is_pending());
    }

    #[test]
    fn null_fields_count_as_absent() {
        let req: CreateOrder =
            serde_json::from_value(serde_json::json!({ "product_name": null, "quantity": 1 })).unwrap();
        assert!(req.validate().is_err());

        let patch: OrderPatch = serde_json::from_value(serde_json::json!({ "status": null })).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn status_patch_leaves_other_fields_alone() {
        let mut order = widget();
        let before = order.clone();
        OrderPatch::status("completed").apply_to(&mut order);

        assert_eq!(order.status().as_str(), "completed");
        assert_eq!(order.product_name(), before.product_name());
        assert_eq!(order.quantity(), before.quantity());
        assert_eq!(order.created_at(), before.created_at());
        assert_eq!(order.id(), before.id());
    }

    #[test]
    fn pending_match_is_case_sensitive() {
        assert!(!OrderStatus::new("Pending").is_pending());
        assert!(!OrderStatus::new("processing").is_pending());
        assert!(OrderStatus::from("pending").is_pending());
    }

    #[test]
    fn any_label_is_accepted() {
        let mut order = widget();
        OrderPatch::status("on-hold (awaiting parts)").apply_to(&mut order);
        assert_eq!(order.status().as_str(), "on-hold (awaiting parts)");
    }

    #[test]
    fn serializes_wire_shape() {
        let order = Order::restore(
            OrderId::new(4),
            "Bolt".into(),
            2,
            OrderStatus::new("processing"),
            None,
        );
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "product_name": "Bolt",
                "quantity": 2,
                "status": "processing",
                "created_at": null,
            })
        );
    }

    proptest! {
        /// Property: applying a patch overwrites exactly the supplied fields.
        #[test]
        fn patch_is_a_merge(
            status in proptest::option::of("[a-zA-Z]{1,12}"),
            product_name in proptest::option::of("[a-zA-Z ]{1,20}"),
            quantity in proptest::option::of(any::<i64>()),
        ) {
            let before = widget();
            let mut after = before.clone();
            let patch = OrderPatch {
                status: status.clone().map(OrderStatus::new),
                product_name: product_name.clone(),
                quantity,
            };
            patch.apply_to(&mut after);

            prop_assert_eq!(after.status().as_str(), status.as_deref().unwrap_or(before.status().as_str()));
            prop_assert_eq!(after.product_name(), product_name.as_deref().unwrap_or(before.product_name()));
            prop_assert_eq!(after.quantity(), quantity.unwrap_or(before.quantity()));
            prop_assert_eq!(after.created_at(), before.created_at());
            prop_assert_eq!(after.id(), before.id());
        }
    }
}
