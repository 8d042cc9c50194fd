// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, password, Claims};
use crate::config;
use crate::database::repository::UserRepository;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /login - verify credentials and mint a JWT
///
/// Tokens are only issued after the password checks out against the stored
/// hash; an identity cannot be minted by just posting an email. Unknown
/// accounts and bad passwords produce the same 401 so the endpoint does not
/// reveal which emails exist.
pub async fn login_post(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let users = UserRepository::new(&state.pool);

    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    password::verify_password(&payload.password, &user.password_hash)
        .map_err(|_| ApiError::unauthorized("invalid credentials"))?;

    let security = &config::config().security;
    let claims = Claims::new(user.email, security.jwt_expiry_hours);
    let token = auth::issue_token(&claims, &security.jwt_secret).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("failed to issue token")
    })?;

    tracing::info!("issued token for {}", claims.email);
    Ok(Json(json!({ "token": token })))
}
