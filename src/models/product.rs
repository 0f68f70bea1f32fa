use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::require_non_empty;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub on_offer: bool,
    pub details: Option<String>,
    pub image_url: Option<String>,
}

/// Create and full-replace update share one payload; there is no partial
/// patch.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    #[serde(default)]
    pub on_offer: bool,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.name, "name")?;
        if self.quantity < 0 {
            return Err(ApiError::validation("quantity must not be negative"));
        }
        if self.price < Decimal::new(1, 2) {
            return Err(ApiError::validation("price must be at least 0.01"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductRequest {
        ProductRequest {
            name: "Widget".into(),
            quantity: 5,
            price: Decimal::new(999, 2),
            on_offer: false,
            details: None,
            image_url: None,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(widget().validate().is_ok());
    }

    #[test]
    fn zero_price_rejected() {
        let mut p = widget();
        p.price = Decimal::ZERO;
        assert!(p.validate().is_err());
    }

    #[test]
    fn negative_quantity_rejected() {
        let mut p = widget();
        p.quantity = -1;
        assert!(p.validate().is_err());
    }
}
