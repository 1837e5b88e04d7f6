//! # Cart State
//!
//! Owns the cart of one shopping session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. A delayed add finishes on whichever task polls it
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Lifecycle                               │
//! │                                                                         │
//! │  CartState::new() ──► session id (UUID v4), empty cart                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  with_cart_mut(|c| c.add_item(..))   ◄── add_to_cart / remove / clear  │
//! │  with_cart(|c| ...)                  ◄── get_cart (read only)          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  end_session() ──► summary logged, cart cleared                        │
//! │                                                                         │
//! │  Nothing is persisted: a new session always starts empty.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::Cart;
use tracing::info;
use uuid::Uuid;

/// What a session left behind when it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub lines: usize,
    pub item_count: u64,
    pub total_price: String,
}

/// Thread-safe cart state for one session.
///
/// ## Usage
/// ```rust
/// use storefront_app::state::CartState;
///
/// let cart_state = CartState::new();
/// let count = cart_state.with_cart(|cart| cart.item_count());
/// assert_eq!(count, 0);
/// ```
#[derive(Debug, Clone)]
pub struct CartState {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new session with an empty cart.
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, "Cart session started");

        CartState {
            session_id,
            started_at: Utc::now(),
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Executes a function with read access to the cart.
    ///
    /// A poisoned lock is recovered: every cart operation leaves the cart
    /// consistent before it can panic.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Ends the session: logs a summary and empties the cart.
    pub fn end_session(&self) -> SessionSummary {
        let summary = self.with_cart_mut(|cart| {
            let summary = SessionSummary {
                session_id: self.session_id,
                lines: cart.len(),
                item_count: cart.item_count(),
                total_price: cart.total_price(),
            };
            cart.clear();
            summary
        });

        let duration_secs = (Utc::now() - self.started_at).num_seconds();
        info!(
            session_id = %summary.session_id,
            lines = summary.lines,
            item_count = summary.item_count,
            total = %summary.total_price,
            duration_secs,
            "Cart session ended"
        );

        summary
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
