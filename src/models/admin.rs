use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_min_len, validate_email};
use crate::error::ApiError;

/// Privileged principal, distinct from [`super::employee::Employee`].
/// `is_admin = true` marks a superior admin that no endpoint may delete.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Admin {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CreateRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_min_len(&self.name, 3, "name")?;
        validate_email(&self.email)?;
        require_min_len(&self.password, 8, "password")?;
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
        require_min_len(&self.password, 8, "password")?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub token: String,
}
