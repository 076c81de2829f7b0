//! Session middleware configuration and session-held customer state.
//!
//! Each browser session owns exactly one cart and one checkout flow, stored
//! in an in-memory session record. Nothing survives a server restart.
//!
//! The store is a bounded moka cache: records are dropped once they expire,
//! and the least recently used are evicted when the configured capacity is
//! reached.

use boutique_core::{Cart, CheckoutFlow};
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;
use crate::error::Result;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "boutique_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session keys for customer state.
pub mod session_keys {
    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the checkout flow (step, shipping form, payment method).
    pub const CHECKOUT: &str = "checkout";
}

/// Create the bounded in-memory session store.
#[must_use]
pub fn create_session_store(config: &StorefrontConfig) -> MokaStore {
    MokaStore::new(Some(config.session_capacity.get()))
}

/// Create the session layer over a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    SessionManagerLayer::new(create_session_store(config))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Get the session's cart, empty if none has been saved yet.
///
/// # Errors
///
/// Returns an error if the session record cannot be loaded or decoded.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the session's cart.
///
/// # Errors
///
/// Returns an error if the session record cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Get the session's checkout flow, starting at shipping if none exists.
///
/// # Errors
///
/// Returns an error if the session record cannot be loaded or decoded.
pub async fn load_checkout(session: &Session) -> Result<CheckoutFlow> {
    Ok(session
        .get::<CheckoutFlow>(session_keys::CHECKOUT)
        .await?
        .unwrap_or_default())
}

/// Store the session's checkout flow.
///
/// # Errors
///
/// Returns an error if the session record cannot be written.
pub async fn save_checkout(session: &Session, flow: &CheckoutFlow) -> Result<()> {
    session.insert(session_keys::CHECKOUT, flow).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::SessionStore;
    use tower_sessions::cookie::time::{Duration, OffsetDateTime};
    use tower_sessions::session::{Id, Record};

    use super::*;

    fn record(expires_in: Duration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::from([(
                session_keys::CART.to_string(),
                serde_json::json!({ "lines": [] }),
            )]),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_store_keeps_live_sessions() {
        let config = StorefrontConfig::from_vars(|_| None).unwrap();
        let store = create_session_store(&config);

        let mut live = record(Duration::hours(1));
        store.create(&mut live).await.unwrap();

        let loaded = store.load(&live.id).await.unwrap().unwrap();
        assert!(loaded.data.contains_key(session_keys::CART));
    }

    #[tokio::test]
    async fn test_store_drops_deleted_sessions() {
        let config = StorefrontConfig::from_vars(|_| None).unwrap();
        let store = create_session_store(&config);

        let mut live = record(Duration::hours(1));
        store.create(&mut live).await.unwrap();
        store.delete(&live.id).await.unwrap();

        assert!(store.load(&live.id).await.unwrap().is_none());
    }
}
