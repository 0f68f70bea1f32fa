use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_non_empty;
use crate::error::ApiError;

/// Every new order starts here; staff move it along manually.
pub const STATUS_PROCESSING: &str = "Processing";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub customer_email: String,
    pub status: String,
    pub delivery_address: String,
    pub shipping_type: String,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub payment_method: String,
    pub delivery_estimate: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Loaded separately; not a column of `orders`.
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub delivery_address: String,
    pub shipping_type: String,
    pub shipping_cost: Decimal,
    /// Trusted from the caller; not recomputed from the items.
    pub total: Decimal,
    pub payment_method: String,
    #[serde(default)]
    pub delivery_estimate: Option<String>,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.delivery_address, "delivery_address")?;
        require_non_empty(&self.shipping_type, "shipping_type")?;
        require_non_empty(&self.payment_method, "payment_method")?;
        if self.shipping_cost < Decimal::ZERO {
            return Err(ApiError::validation("shipping_cost must not be negative"));
        }
        if self.total < Decimal::ZERO {
            return Err(ApiError::validation("total must not be negative"));
        }
        if self.items.is_empty() {
            return Err(ApiError::validation("an order needs at least one item"));
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

impl OrderItemRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.product_name, "product_name")?;
        if self.quantity < 1 {
            return Err(ApiError::validation("item quantity must be at least 1"));
        }
        if self.unit_price < Decimal::ZERO {
            return Err(ApiError::validation("unit_price must not be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.status, "status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            delivery_address: "1 Main St".into(),
            shipping_type: "standard".into(),
            shipping_cost: Decimal::new(500, 2),
            total: Decimal::new(2500, 2),
            payment_method: "card".into(),
            delivery_estimate: None,
            items,
        }
    }

    fn item() -> OrderItemRequest {
        OrderItemRequest {
            product_id: 1,
            product_name: "Widget".into(),
            quantity: 2,
            unit_price: Decimal::new(1000, 2),
        }
    }

    #[test]
    fn empty_item_list_rejected() {
        assert!(order_with(vec![]).validate().is_err());
    }

    #[test]
    fn zero_quantity_item_rejected() {
        let mut it = item();
        it.quantity = 0;
        assert!(order_with(vec![it]).validate().is_err());
    }

    #[test]
    fn well_formed_order_passes() {
        assert!(order_with(vec![item()]).validate().is_ok());
    }
}
