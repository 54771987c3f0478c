//! Wishlist engine

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::ProductId;
use serde::{Deserialize, Serialize};

/// Set of favorited products, keyed by product id. Pure engine; durable
/// persistence lives in [`crate::session::WishlistStore`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts unless an entry with the same id exists. Returns whether the
    /// wishlist changed.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.items.push(product);
        true
    }

    /// Deletes the entry for `product_id` if present. Returns whether the
    /// wishlist changed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| &p.id != product_id);
        self.items.len() != before
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::tests::sample;

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.add(sample("P001", 2499)));
        assert!(!wishlist.add(sample("P001", 2499)));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_remove_and_contains() {
        let mut wishlist = Wishlist::new();
        let art = sample("P002", 8999);
        wishlist.add(art.clone());
        assert!(wishlist.contains(&art.id));
        assert!(wishlist.remove(&art.id));
        assert!(!wishlist.contains(&art.id));
        assert!(!wishlist.remove(&art.id));
    }
}
