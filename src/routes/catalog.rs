//! Catalog routes — product list and detail.
//!
//! The catalog is fetched from the external host on every request; a failed
//! fetch degrades to an empty list here so the storefront renders with no
//! items instead of erroring.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::services::catalog;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Name-substring search, case-insensitive. Absent means the full list.
    pub q: Option<String>,
}

/// `GET /api/products` — the catalog, optionally filtered by name.
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<catalog::Product>> {
    let products = state.catalog.fetch_or_empty().await;
    let products = match query.q.as_deref() {
        Some(q) if !q.is_empty() => catalog::filter_by_name(products, q),
        _ => products,
    };
    Json(products)
}

/// `GET /api/products/{id}` — one product by numeric id, or by slug for
/// non-numeric path segments. Unknown products are a visible not-found
/// state, not a failure.
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let products = state.catalog.fetch_or_empty().await;
    let found = match id.parse::<u64>() {
        Ok(numeric) => catalog::find_by_id(&products, numeric),
        Err(_) => catalog::find_by_slug(&products, &id),
    };
    match found {
        Some(product) => Json(product).into_response(),
        None => (StatusCode::NOT_FOUND, "product not found").into_response(),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
