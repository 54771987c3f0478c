//! Catalog store

use crate::client::ApiClient;
use crate::domain::aggregates::Product;
use crate::domain::value_objects::ProductId;
use crate::Result;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOption {
    #[default]
    RatingDesc,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

/// Derived catalog view parameters. `category: None` means every category;
/// the query matches name or description, case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub query: String,
    pub sort: SortOption,
}

/// In-memory product list fetched from the backend. Views over it are
/// derived on demand and never persisted.
pub struct CatalogStore {
    api: Arc<ApiClient>,
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            products: Vec::new(),
        }
    }

    /// Best-effort refresh: a failed fetch degrades to an empty catalog
    /// rather than surfacing an error to the view.
    pub async fn refresh(&mut self) {
        match self.api.fetch_products().await {
            Ok(products) => self.products = products,
            Err(err) => {
                tracing::warn!(error = %err, "product list refresh failed, catalog degraded to empty");
                self.products.clear();
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    /// Filtered and sorted view over the current products.
    pub fn view(&self, filter: &CatalogFilter) -> Vec<&Product> {
        let query = filter.query.to_lowercase();
        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |category| &p.category == category)
            })
            .filter(|p| {
                query.is_empty()
                    || p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .collect();
        match filter.sort {
            SortOption::RatingDesc => matches.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortOption::PriceAsc => matches.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOption::PriceDesc => matches.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::NameAsc => {
                matches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
        }
        matches
    }

    /// Single product lookup: the in-memory list first, the backend second.
    pub async fn get(&self, product_id: &ProductId) -> Result<Product> {
        if let Some(product) = self.products.iter().find(|p| &p.id == product_id) {
            return Ok(product.clone());
        }
        self.api.fetch_product(product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::tests::sample;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn store_with(products: Vec<Product>) -> CatalogStore {
        let api =
            Arc::new(ApiClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap());
        let mut store = CatalogStore::new(api);
        store.products = products;
        store
    }

    fn catalog() -> CatalogStore {
        let mut journal = sample("P001", 2499);
        journal.name = "Sustainable Peace Journal".into();
        journal.category = "Stationery".into();
        journal.rating = Decimal::new(48, 1);

        let mut art = sample("P002", 8999);
        art.name = "Justice Scales Artwork".into();
        art.category = "Art".into();
        art.rating = Decimal::new(49, 1);

        let mut coffee = sample("P003", 1999);
        coffee.name = "Unity Coffee Blend".into();
        coffee.description = "Fair trade coffee blend".into();
        coffee.category = "Food".into();
        coffee.rating = Decimal::new(47, 1);

        store_with(vec![journal, art, coffee])
    }

    #[test]
    fn test_default_view_sorts_by_rating_desc() {
        let store = catalog();
        let view = store.view(&CatalogFilter::default());
        let names: Vec<&str> = view.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Justice Scales Artwork",
                "Sustainable Peace Journal",
                "Unity Coffee Blend"
            ]
        );
    }

    #[test]
    fn test_category_and_query_filters() {
        let store = catalog();
        let filter = CatalogFilter {
            category: Some("Food".into()),
            ..Default::default()
        };
        assert_eq!(store.view(&filter).len(), 1);

        let filter = CatalogFilter {
            query: "FAIR TRADE".into(),
            ..Default::default()
        };
        let view = store.view(&filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "Unity Coffee Blend");
    }

    #[test]
    fn test_price_sort() {
        let store = catalog();
        let filter = CatalogFilter {
            sort: SortOption::PriceAsc,
            ..Default::default()
        };
        let cents: Vec<i64> = store
            .view(&filter)
            .iter()
            .map(|p| p.price.to_cents())
            .collect();
        assert_eq!(cents, [1999, 2499, 8999]);
    }

    #[test]
    fn test_categories_distinct() {
        let mut products = vec![sample("P001", 100), sample("P002", 200)];
        products[0].category = "Art".into();
        products[1].category = "Art".into();
        let store = store_with(products);
        assert_eq!(store.categories(), ["Art"]);
    }
}
