//! Client session context.
//!
//! One [`Session`] owns every client-side engine for the lifetime of a
//! logical user session: constructed at start, dropped at end. There are no
//! process-wide singletons; view code receives this context explicitly.

mod admin;
mod auth;
mod catalog;
mod wishlist;

pub use admin::AdminPanel;
pub use auth::AuthSession;
pub use catalog::{CatalogFilter, CatalogStore, SortOption};
pub use wishlist::WishlistStore;

use crate::checkout::{CheckoutFlow, HttpGateway};
use crate::client::ApiClient;
use crate::config::SessionConfig;
use crate::domain::aggregates::Cart;
use crate::storage::DurableStore;
use crate::{Result, StoreError};
use std::sync::Arc;
use std::time::Duration;

pub struct Session {
    pub catalog: CatalogStore,
    pub cart: Cart,
    pub wishlist: WishlistStore,
    pub auth: AuthSession,
    pub admin: AdminPanel,
    api: Arc<ApiClient>,
    gateway_url: String,
    timeout: Duration,
}

impl Session {
    /// Builds the session engines: opens durable storage, rehydrates the
    /// wishlist and any persisted auth state, and starts with an empty cart.
    pub fn start(config: SessionConfig) -> Result<Self> {
        let api = Arc::new(ApiClient::new(config.api_base_url.as_str(), config.timeout)?);
        let store = Arc::new(DurableStore::open(config.data_dir.clone())?);
        Ok(Self {
            catalog: CatalogStore::new(api.clone()),
            cart: Cart::new(),
            wishlist: WishlistStore::load(store.clone()),
            auth: AuthSession::new(api.clone(), store),
            admin: AdminPanel::new(api.clone()),
            gateway_url: config.gateway_url,
            timeout: config.timeout,
            api,
        })
    }

    /// Begins a checkout attempt over the current cart. An empty cart is
    /// refused here, before any network activity, mirroring the storefront's
    /// redirect back to the cart view.
    pub fn begin_checkout(&self) -> Result<CheckoutFlow<HttpGateway>> {
        if self.cart.is_empty() {
            return Err(StoreError::Validation("cart is empty".to_string()));
        }
        let gateway = HttpGateway::new(self.api.clone(), self.gateway_url.as_str(), self.timeout)?;
        Ok(CheckoutFlow::new(gateway))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::tests::sample;

    fn config(dir: &std::path::Path) -> SessionConfig {
        SessionConfig {
            data_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_cart_cannot_begin_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::start(config(dir.path())).unwrap();
        assert!(session.begin_checkout().is_err());
    }

    #[test]
    fn test_populated_cart_can_begin_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::start(config(dir.path())).unwrap();
        session.cart.add_item(&sample("P001", 2499));
        assert!(session.begin_checkout().is_ok());
    }
}
