// handlers/protected/inventory.rs - user-scoped inventory reads
//
// Runs behind the bearer-token middleware; the self-access policy is
// checked here before the pool is touched.

use axum::{
    extract::{Query, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::policy;
use crate::database::repository::InventoryRepository;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MyItemsQuery {
    pub email: Option<String>,
}

/// GET /myitems - list the caller's own inventory
///
/// The claims extension is taken as optional on purpose: if it is absent
/// for any reason the policy denies, it never falls open to all rows. A
/// missing query email can't match any verified identity and denies too.
pub async fn myitems_get(
    State(state): State<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Query(query): Query<MyItemsQuery>,
) -> ApiResult<Json<Vec<Value>>> {
    let verified = auth_user.as_ref().map(|Extension(user)| user.email.as_str());

    let Some(requested) = query.email.as_deref() else {
        return Err(ApiError::forbidden("Forbidden access"));
    };

    policy::authorize_self_access(verified, requested)?;

    let items = InventoryRepository::new(&state.pool)
        .find_by_email(requested)
        .await?;

    Ok(Json(items))
}
