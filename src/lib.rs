use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use store::OrderStore;

/// Build the full application router over an explicitly constructed store
/// handle. Tests drive this router in-process.
pub fn app(store: OrderStore) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", post(handlers::login::login_post))
        // Order routes, bearer token required
        .merge(order_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

fn order_routes() -> Router<OrderStore> {
    use handlers::order;

    Router::new()
        .route("/order", post(order::order_post))
        .route("/order/list", get(order::order_list))
        .route(
            "/order/:id",
            get(order::order_get)
                .put(order::order_put)
                .delete(order::order_delete),
        )
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Order API",
        "version": version,
        "endpoints": {
            "login": "POST /login (public)",
            "orders": "POST /order, GET /order/list, GET /order/:id, PUT /order/:id, DELETE /order/:id (bearer token required)",
        }
    }))
}

async fn health(State(store): State<OrderStore>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
