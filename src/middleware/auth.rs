use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::config;
use crate::error::ApiError;

/// Verified caller identity extracted from the bearer token and attached to
/// the request extensions for downstream handlers.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

/// Bearer-token verification for protected routes.
///
/// Every failure returns before `next.run` is reached, so a protected
/// handler only ever executes with verified claims in the extensions:
/// - no Authorization header at all -> 401
/// - header present but malformed, bad signature, or expired -> 403
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    let token = extract_bearer_token(auth_header)?;

    let secret = &config::config().security.jwt_secret;
    let claims = auth::verify_token(&token, secret).map_err(|e| {
        tracing::debug!("token rejected: {}", e);
        ApiError::forbidden("Forbidden access")
    })?;

    request.extensions_mut().insert(AuthUser {
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Pull the token out of a `Bearer <token>` header value. A header that is
/// present but unusable is a 403, not a 401; only a missing header counts
/// as "no token supplied".
fn extract_bearer_token(value: &HeaderValue) -> Result<String, ApiError> {
    let auth_str = value
        .to_str()
        .map_err(|_| ApiError::forbidden("Forbidden access"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::forbidden("Forbidden access"))?;

    if token.trim().is_empty() {
        return Err(ApiError::forbidden("Forbidden access"));
    }

    Ok(token.to_string())
}
