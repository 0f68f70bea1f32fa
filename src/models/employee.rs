use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_min_len, require_non_empty, validate_email};
use crate::error::ApiError;

/// Back-office staff member. The role string is embedded in issued tokens
/// and gates the staff-only routes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub role: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_min_len(&self.name, 3, "name")?;
        require_non_empty(&self.role, "role")?;
        validate_email(&self.email)?;
        require_min_len(&self.password, 6, "password")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_email(&self.email)?;
        require_non_empty(&self.password, "password")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
