//! Durable wishlist

use crate::domain::aggregates::{Product, Wishlist};
use crate::domain::value_objects::ProductId;
use crate::storage::{DurableStore, WISHLIST_KEY};
use crate::Result;
use std::sync::Arc;

/// Wishlist engine bound to durable storage. Rehydrated at session start;
/// every mutation synchronously re-serializes the full state under the
/// `wishlist-storage` key.
pub struct WishlistStore {
    store: Arc<DurableStore>,
    inner: Wishlist,
}

impl WishlistStore {
    pub fn load(store: Arc<DurableStore>) -> Self {
        let inner = store.get::<Wishlist>(WISHLIST_KEY).unwrap_or_default();
        Self { store, inner }
    }

    pub fn items(&self) -> &[Product] {
        self.inner.items()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.inner.contains(product_id)
    }

    /// Set-semantics insert; a duplicate id neither grows the list nor
    /// rewrites storage. Returns whether the wishlist changed.
    pub fn add_item(&mut self, product: Product) -> Result<bool> {
        if !self.inner.add(product) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<bool> {
        if !self.inner.remove(product_id) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        self.store.set(WISHLIST_KEY, &self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::tests::sample;

    #[test]
    fn test_persists_across_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        {
            let mut wishlist = WishlistStore::load(store.clone());
            wishlist.add_item(sample("P001", 2499)).unwrap();
            wishlist.add_item(sample("P002", 8999)).unwrap();
        }

        let reloaded = WishlistStore::load(store);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.is_in_wishlist(&ProductId::new("P001").unwrap()));
        assert!(reloaded.is_in_wishlist(&ProductId::new("P002").unwrap()));
    }

    #[test]
    fn test_duplicate_add_does_not_grow_storage() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        let mut wishlist = WishlistStore::load(store.clone());
        assert!(wishlist.add_item(sample("P001", 2499)).unwrap());
        assert!(!wishlist.add_item(sample("P001", 2499)).unwrap());

        let reloaded = WishlistStore::load(store);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        let mut wishlist = WishlistStore::load(store.clone());
        wishlist.add_item(sample("P001", 2499)).unwrap();
        assert!(wishlist
            .remove_item(&ProductId::new("P001").unwrap())
            .unwrap());

        let reloaded = WishlistStore::load(store);
        assert!(reloaded.is_empty());
    }
}
