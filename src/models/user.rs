use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{require_min_len, require_non_empty, validate_email};
use crate::error::ApiError;

/// Self-service customer account. The password hash never leaves the
/// handlers that need it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.full_name, "full_name")?;
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
pub struct LoginResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Email self-update: re-authenticates with the current password and
/// requires the new address typed twice.
#[derive(Debug, Deserialize)]
pub struct UpdateEmailRequest {
    pub current_email: String,
    pub new_email: String,
    pub confirm_email: String,
    pub password: String,
}

impl UpdateEmailRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_email(&self.current_email)?;
        validate_email(&self.new_email)?;
        validate_email(&self.confirm_email)?;
        require_non_empty(&self.password, "password")?;
        if self.new_email != self.confirm_email {
            return Err(ApiError::validation(
                "new email and confirmation do not match",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePhoneRequest {
    #[serde(default)]
    pub current_phone: Option<String>,
    pub new_phone: String,
    pub confirm_phone: String,
    pub password: String,
}

impl UpdatePhoneRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_empty(&self.new_phone, "new_phone")?;
        require_non_empty(&self.password, "password")?;
        if self.new_phone != self.confirm_phone {
            return Err(ApiError::validation(
                "new phone and confirmation do not match",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_name_email_password() {
        let mut req = RegisterRequest {
            full_name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            phone: None,
        };
        assert!(req.validate().is_ok());

        req.full_name = " ".into();
        assert!(req.validate().is_err());

        req.full_name = "Ana".into();
        req.password = "short".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn email_update_requires_matching_confirmation() {
        let req = UpdateEmailRequest {
            current_email: "old@example.com".into(),
            new_email: "new@example.com".into(),
            confirm_email: "other@example.com".into(),
            password: "secret1".into(),
        };
        assert!(req.validate().is_err());
    }
}
