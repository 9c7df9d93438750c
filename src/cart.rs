//! Cart store — the unique-by-id line collection behind the storefront.
//!
//! DESIGN
//! ======
//! One `CartStore` exists per session. Lines are kept in insertion order and
//! unique by product id. The total is recomputed from the lines on every
//! read rather than maintained as a counter, so it can never drift from the
//! line contents.
//!
//! Repeated adds of the same id merge by summing quantities; the existing
//! line keeps its name/price/image snapshot and the incoming copies are
//! discarded. Setting a quantity to zero removes the line outright — a
//! quantity-0 line never exists in the store.
//!
//! Mutations notify registered watchers over unbounded channels. Watchers
//! whose receiver is gone are pruned on the next notification; no-op
//! mutations emit nothing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

/// One entry in the cart: a product snapshot plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Opaque identifier matching a catalog product id.
    pub id: String,
    pub name: String,
    /// Unit price in integer cents.
    pub price: u64,
    pub image: String,
    /// Always >= 1 while the line is in the store.
    pub quantity: u32,
}

/// Mutation notification delivered to cart watchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was inserted or merged; `quantity` is the post-merge count.
    Added { id: String, quantity: u32 },
    /// A line's quantity was replaced.
    QuantitySet { id: String, quantity: u32 },
    /// A line left the store.
    Removed { id: String },
}

// =============================================================================
// STORE
// =============================================================================

/// Session-scoped cart. All mutation goes through [`add`](Self::add),
/// [`remove`](Self::remove), and [`set_quantity`](Self::set_quantity); the
/// line list is only ever handed out read-only.
#[derive(Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    /// Registered watchers: handle -> sender for mutation events.
    watchers: HashMap<Uuid, mpsc::UnboundedSender<CartEvent>>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `line`. An existing line with the same id keeps its snapshot
    /// and gains the incoming quantity; a new line is appended. An insert of
    /// quantity 0 for an unknown id creates nothing.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            if line.quantity == 0 {
                return;
            }
            // Quantities are client-supplied; saturate rather than wrap so a
            // merge can never overflow back to a quantity-0 line.
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            let event = CartEvent::Added { id: line.id, quantity: existing.quantity };
            self.notify(event);
            return;
        }

        if line.quantity == 0 {
            return;
        }
        let event = CartEvent::Added { id: line.id.clone(), quantity: line.quantity };
        self.lines.push(line);
        self.notify(event);
    }

    /// Delete the line with `id`. Silent no-op if absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        if self.lines.len() != before {
            self.notify(CartEvent::Removed { id: id.to_owned() });
        }
    }

    /// Replace the quantity of the line with `id`. Zero removes the line;
    /// an unknown id is a no-op — a bare quantity update never creates a line.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
            self.notify(CartEvent::QuantitySet { id: id.to_owned(), quantity });
        }
    }

    /// Sum of `price * quantity` over all lines. Recomputed on every call,
    /// never cached. Prices are client-supplied, so the math saturates
    /// instead of wrapping.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |total, l| total.saturating_add(l.price.saturating_mul(u64::from(l.quantity))))
    }

    /// Current lines in insertion order, read-only.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Register a watcher for mutation events; returns the handle for
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, sender: mpsc::UnboundedSender<CartEvent>) -> Uuid {
        let handle = Uuid::new_v4();
        self.watchers.insert(handle, sender);
        handle
    }

    /// Drop a watcher. No-op for unknown handles.
    pub fn unsubscribe(&mut self, handle: Uuid) {
        self.watchers.remove(&handle);
    }

    fn notify(&mut self, event: CartEvent) {
        self.watchers.retain(|_, tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
