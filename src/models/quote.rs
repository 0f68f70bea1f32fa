use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_non_empty, validate_email};
use crate::error::ApiError;

pub const STATUS_PENDING: &str = "pending";

/// Quote lifecycle: pending -> in_review -> approved | rejected.
pub const QUOTE_STATUSES: &[&str] = &["pending", "in_review", "approved", "rejected"];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuoteRequest {
    pub id: i32,
    pub client_name: String,
    pub client_email: String,
    pub phone: String,
    pub description: String,
    pub service_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub client_name: String,
    pub client_email: String,
    pub phone: String,
    pub description: String,
    #[serde(default)]
    pub service_name: Option<String>,
}

impl CreateQuoteRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.client_name, "client_name")?;
        validate_email(&self.client_email)?;
        require_non_empty(&self.phone, "phone")?;
        require_non_empty(&self.description, "description")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if QUOTE_STATUSES.contains(&self.status.as_str()) {
            Ok(())
        } else {
            Err(ApiError::validation(format!(
                "status must be one of: {}",
                QUOTE_STATUSES.join(", ")
            )))
        }
    }
}
