use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting warehouse API in {:?} mode", config.environment);

    let pool = match database::connect_pool(config) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to configure database pool: {}", e);
            std::process::exit(1);
        }
    };

    // The pool connects lazily; if the store is not up yet the process still
    // starts and handlers answer 503 until it is.
    if let Err(e) = database::init_schema(&pool).await {
        tracing::warn!("schema init deferred, database not reachable: {}", e);
    }

    let app = app(AppState { pool });

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("warehouse API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(config::config().server.request_timeout_secs);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(product_routes())
        // Protected
        .merge(myitems_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route("/login", post(auth::login_post))
        .route("/register", post(auth::register_post))
}

fn product_routes() -> Router<AppState> {
    use handlers::public::product;

    Router::new()
        .route(
            "/product",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/product/:id",
            get(product::get_product)
                .put(product::update_product_quantity)
                .delete(product::delete_product),
        )
}

fn myitems_routes() -> Router<AppState> {
    use handlers::protected::inventory;

    Router::new()
        .route("/myitems", get(inventory::myitems_get))
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> &'static str {
    "Warehouse Management Server"
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unreachable"
                })),
            )
        }
    }
}
