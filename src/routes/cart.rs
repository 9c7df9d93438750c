//! Cart routes — read and mutate the session's cart.
//!
//! Handlers translate requests into the three cart operations and return the
//! full cart snapshot afterwards, so clients never compute totals themselves.
//! Mutations on unknown line ids are silent no-ops, mirroring the store.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::auth::SessionAuth;
use crate::cart::{CartLine, CartStore};
use crate::state::AppState;

/// Cart snapshot returned by every cart endpoint.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    /// Integer cents, recomputed from the items.
    pub total_price: u64,
}

pub(crate) fn cart_view(cart: &CartStore) -> CartView {
    CartView { items: cart.lines().to_vec(), total_price: cart.total_price() }
}

/// Run `mutate` against the session's cart under the write lock and return
/// the resulting snapshot.
async fn with_cart<F>(state: &AppState, token: &str, mutate: F) -> Result<CartView, StatusCode>
where
    F: FnOnce(&mut CartStore),
{
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(token).ok_or(StatusCode::UNAUTHORIZED)?;
    mutate(&mut session.cart);
    Ok(cart_view(&session.cart))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/cart` — current lines and total.
pub async fn get_cart(State(state): State<AppState>, auth: SessionAuth) -> Result<Json<CartView>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&auth.token).ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(cart_view(&session.cart)))
}

/// `POST /api/cart/items` — add a line; repeated ids merge quantities.
pub async fn add_item(
    State(state): State<AppState>,
    auth: SessionAuth,
    Json(line): Json<CartLine>,
) -> Result<Json<CartView>, StatusCode> {
    let view = with_cart(&state, &auth.token, |cart| cart.add(line)).await?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// `PATCH /api/cart/items/{id}` — replace the quantity; 0 removes the line.
pub async fn set_item_quantity(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
    Json(update): Json<QuantityUpdate>,
) -> Result<Json<CartView>, StatusCode> {
    let view = with_cart(&state, &auth.token, |cart| cart.set_quantity(&id, update.quantity)).await?;
    Ok(Json(view))
}

/// `DELETE /api/cart/items/{id}` — remove a line; absent ids are a no-op.
pub async fn remove_item(
    State(state): State<AppState>,
    auth: SessionAuth,
    Path(id): Path<String>,
) -> Result<Json<CartView>, StatusCode> {
    let view = with_cart(&state, &auth.token, |cart| cart.remove(&id)).await?;
    Ok(Json(view))
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
