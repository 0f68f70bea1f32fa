pub mod admin;
pub mod employee;
pub mod news;
pub mod order;
pub mod product;
pub mod quote;
pub mod service;
pub mod support;
pub mod user;

use crate::error::ApiError;

/// Basic email shape check; anything stricter belongs to the mail provider.
pub fn validate_email(email: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = email.split('@').collect();
    let ok = parts.len() == 2
        && !parts[0].is_empty()
        && parts[1].contains('.')
        && !parts[1].starts_with('.')
        && !parts[1].ends_with('.');

    if ok {
        Ok(())
    } else {
        Err(ApiError::validation(format!("invalid email format: {email}")))
    }
}

pub fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

pub fn require_min_len(value: &str, min: usize, field: &str) -> Result<(), ApiError> {
    if value.trim().len() < min {
        Err(ApiError::validation(format!(
            "{field} must be at least {min} characters"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a@.com").is_err());
    }

    #[test]
    fn non_empty_and_min_len() {
        assert!(require_non_empty("x", "name").is_ok());
        assert!(require_non_empty("   ", "name").is_err());
        assert!(require_min_len("abcdef", 6, "password").is_ok());
        assert!(require_min_len("abcde", 6, "password").is_err());
    }
}
