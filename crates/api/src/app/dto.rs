use serde::Serialize;

// -------------------------
// Request DTOs
// -------------------------
//
// Request bodies deserialize straight into the domain input types: every field
// is optional there, JSON `null` reads as absent, and unknown fields (an `id`,
// a `status` on create) are ignored.

pub type CreateOrderRequest = shopfloor_orders::CreateOrder;
pub type UpdateOrderRequest = shopfloor_orders::OrderPatch;
pub type CreateItemRequest = shopfloor_inventory::CreateItem;
pub type UpdateItemRequest = shopfloor_inventory::ItemPatch;

// -------------------------
// Response DTOs
// -------------------------

/// `{"message": ...}` body used by probes and delete confirmations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Body served at `/`.
#[derive(Debug, Clone, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub status: &'static str,
}

pub const BANNER: BannerResponse = BannerResponse {
    message: "Manufacturing API Backend",
    status: "running",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_ignores_status_and_nulls() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"product_name":"Widget","quantity":null,"status":"done"}"#)
                .unwrap();
        assert_eq!(req.product_name.as_deref(), Some("Widget"));
        assert_eq!(req.quantity, None);
    }

    #[test]
    fn update_item_accepts_partial_bodies() {
        let req: UpdateItemRequest = serde_json::from_str(r#"{"stock_qty":20}"#).unwrap();
        assert_eq!(req.stock_qty, Some(20));
        assert!(req.item_name.is_none() && req.min_threshold.is_none());
    }

    #[test]
    fn banner_shape() {
        assert_eq!(
            serde_json::to_value(BANNER).unwrap(),
            serde_json::json!({"message": "Manufacturing API Backend", "status": "running"})
        );
    }
}
