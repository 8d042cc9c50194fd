use sqlx::PgPool;

/// Shared application state handed to every handler through axum's `State`
/// extractor. One pool for the process lifetime; sqlx pools are internally
/// reference-counted, so the per-request clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}
