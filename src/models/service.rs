use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_min_len, require_non_empty};
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub on_offer: bool,
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub on_offer: bool,
    pub details: String,
}

impl ServiceRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.name, "name")?;
        if self.price < Decimal::new(1, 2) {
            return Err(ApiError::validation("price must be at least 0.01"));
        }
        // Unlike products, service details are mandatory copy for the site
        require_min_len(&self.details, 10, "details")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_details_rejected() {
        let req = ServiceRequest {
            name: "Setup".into(),
            price: Decimal::new(5000, 2),
            on_offer: false,
            details: "too short".into(),
        };
        assert!(req.validate().is_err());
    }
}
