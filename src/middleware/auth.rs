use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Authenticated subject extracted from a verified token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
}

/// Bearer-token middleware for the order routes.
///
/// A missing or malformed Authorization header is 401; a token that fails
/// verification (bad signature, malformed, expired) is 403.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    // TokenError converts to 403 Forbidden
    let claims = auth::verify(&token)?;

    request.extensions_mut().insert(AuthUser { subject: claims.sub });

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
