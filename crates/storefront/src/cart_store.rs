//! Session-backed cart persistence.
//!
//! The cart snapshot lives in the visitor's session under a fixed key, so it
//! survives page loads for as long as the session cookie does. Reads and
//! writes are best-effort: a missing or unreadable snapshot loads as an
//! empty cart, and a failed write is logged and swallowed - a storage
//! problem never blocks a cart mutation or surfaces to the visitor.
//!
//! All mutations funnel through the cart route handlers, which run one at a
//! time per session, so there is no concurrent-writer concern on the slot.

use bencom_core::Cart;
use tower_sessions::Session;

/// Session key for the cart snapshot.
pub const CART_KEY: &str = "cart_v1";

/// Load the cart snapshot, falling back to an empty cart.
///
/// Never fails: an absent key yields an empty cart, and a snapshot that no
/// longer deserializes (e.g. written by an older build) is discarded.
pub async fn load(session: &Session) -> Cart {
    match session.get::<Cart>(CART_KEY).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Discarding unreadable cart snapshot: {e}");
            Cart::new()
        }
    }
}

/// Write the cart snapshot. Failures are logged, never propagated.
pub async fn save(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(CART_KEY, cart).await {
        tracing::error!("Failed to persist cart snapshot: {e}");
    }
}
