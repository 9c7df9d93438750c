//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the storefront JSON API under a single Axum router with permissive
//! CORS and request tracing. There is no server-rendered frontend here;
//! clients consume the API directly.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod prefs;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/session", post(auth::start_session))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/{id}", get(catalog::get_product))
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{id}",
            patch(cart::set_item_quantity).delete(cart::remove_item),
        )
        .route("/api/prefs/theme", get(prefs::get_theme).put(prefs::set_theme))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
