use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_min_len, validate_email};
use crate::error::ApiError;

pub const STATUS_OPEN: &str = "open";

/// Ticket lifecycle: open -> in_progress -> resolved.
pub const TICKET_STATUSES: &[&str] = &["open", "in_progress", "resolved"];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SupportTicket {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    pub interaction_type: String,
    pub customer_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub interaction_type: Option<String>,
}

impl TicketRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_min_len(&self.name, 3, "name")?;
        validate_email(&self.email)?;
        require_min_len(&self.message, 10, "message")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

impl StatusUpdateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if TICKET_STATUSES.contains(&self.status.as_str()) {
            Ok(())
        } else {
            Err(ApiError::validation(format!(
                "status must be one of: {}",
                TICKET_STATUSES.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lifecycle_values_only() {
        for status in ["open", "in_progress", "resolved"] {
            assert!(StatusUpdateRequest {
                status: status.into()
            }
            .validate()
            .is_ok());
        }
        assert!(StatusUpdateRequest {
            status: "closed".into()
        }
        .validate()
        .is_err());
    }
}
