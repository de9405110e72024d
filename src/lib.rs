pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::middleware::{require_token, require_token_for_profile};
use crate::state::AppState;

/// Full HTTP surface with shared middleware applied.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().api.max_request_size_bytes;
    let cors = cors_layer(&state.config().security);

    Router::new()
        .merge(system_routes())
        .merge(auth_public_routes())
        .merge(auth_routes(state.clone()))
        .merge(customer_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn system_routes() -> Router<AppState> {
    use handlers::system;

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/auth/logout", post(auth::logout_post))
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::auth;

    Router::new()
        .route("/api/auth/profile", get(auth::profile_get))
        .route_layer(from_fn_with_state(state, require_token_for_profile))
}

fn customer_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::customers;

    Router::new()
        .route(
            "/api/customers",
            get(customers::customers_get).post(customers::customer_post),
        )
        .route(
            "/api/customers/:id",
            get(customers::customer_get)
                .put(customers::customer_put)
                .delete(customers::customer_delete),
        )
        .route_layer(from_fn_with_state(state, require_token))
}

/// `*` allows any origin; disabled CORS adds no headers at all.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
