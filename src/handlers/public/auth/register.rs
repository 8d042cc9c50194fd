// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::password;
use crate::database::repository::UserRepository;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// POST /register - store a credential record for later logins
///
/// The plaintext password is hashed here and discarded; only the argon2
/// PHC string is persisted. Re-registering an email is a 409.
pub async fn register_post(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    validate_email_format(&payload.email).map_err(ApiError::bad_request)?;
    password::validate_password_strength(&payload.password).map_err(ApiError::bad_request)?;

    let password_hash = password::hash_password(&payload.password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("registration failed")
    })?;

    let user = UserRepository::new(&state.pool)
        .insert(&payload.email, &password_hash)
        .await?;

    tracing::info!("registered {}", user.email);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": user.id, "email": user.email })),
    ))
}

fn validate_email_format(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("invalid email format");
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("invalid email format");
    }

    Ok(())
}
