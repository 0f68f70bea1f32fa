use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{decode_claims, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated principal extracted from a verified token and attached to
/// the request for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub role: Option<String>,
    pub is_admin: Option<bool>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            is_admin: claims.is_admin,
        }
    }
}

/// Rejects the request unless a valid bearer token is present; on success
/// attaches [`AuthUser`] to the request extensions.
pub async fn require_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&headers)
        .map_err(|msg| ApiError::unauthorized(msg).into_response())?;

    let secret = &config::config().security.jwt_secret;
    let claims = decode_claims(&token, secret)
        .map_err(|e| ApiError::unauthorized(format!("invalid token: {e}")).into_response())?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Attaches [`AuthUser`] when a valid token is present but never rejects.
/// Used on endpoints a visitor may call anonymously (support, chat) where a
/// logged-in caller should still get their identity linked.
pub async fn optional_auth(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Ok(token) = extract_bearer_token(&headers) {
        let secret = &config::config().security.jwt_secret;
        if let Ok(claims) = decode_claims(&token, secret) {
            request.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(request).await
}

/// Second gate after [`require_auth`]: only employees holding the admin
/// role pass.
pub async fn require_staff(request: Request, next: Next) -> Result<Response, Response> {
    let user = request.extensions().get::<AuthUser>();

    match user {
        Some(u) if u.role.as_deref() == Some("admin") => Ok(next.run(request).await),
        Some(_) => {
            Err(ApiError::forbidden("access restricted to administrators").into_response())
        }
        None => Err(ApiError::unauthorized("authentication required").into_response()),
    }
}

/// Second gate after [`require_auth`]: only administrator principals pass.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    let user = request.extensions().get::<AuthUser>();

    match user {
        Some(u) if u.is_admin == Some(true) => Ok(next.run(request).await),
        Some(_) => {
            Err(ApiError::forbidden("access restricted to administrators").into_response())
        }
        None => Err(ApiError::unauthorized("authentication required").into_response()),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err("empty bearer token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Token abc"));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def");
    }
}
