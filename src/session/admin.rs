//! Admin aggregator

use crate::client::ApiClient;
use crate::domain::aggregates::{NewProduct, Order, OrderStatus, Product, UserProfile};
use crate::domain::value_objects::ProductId;
use crate::session::AuthSession;
use crate::{Result, StoreError};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// CRUD proxy over products, users and orders for the admin dashboard.
/// Every operation is gated locally on the auth session before any network
/// call; the backend enforces the same rule with the bearer token.
pub struct AdminPanel {
    api: Arc<ApiClient>,
    products: Vec<Product>,
    users: Vec<UserProfile>,
    orders: Vec<Order>,
}

impl AdminPanel {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            products: Vec::new(),
            users: Vec::new(),
            orders: Vec::new(),
        }
    }

    fn bearer<'a>(auth: &'a AuthSession) -> Result<&'a str> {
        if !auth.is_admin() {
            return Err(StoreError::Forbidden);
        }
        auth.token().ok_or(StoreError::Forbidden)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn users(&self) -> &[UserProfile] {
        &self.users
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn refresh_products(&mut self) -> Result<()> {
        self.products = self.api.fetch_products().await?;
        Ok(())
    }

    pub async fn add_product(&mut self, auth: &AuthSession, new: NewProduct) -> Result<Product> {
        new.validate()?;
        let bearer = Self::bearer(auth)?;
        let created = self.api.create_product(&new, bearer).await?;
        self.products.push(created.clone());
        Ok(created)
    }

    pub async fn update_product(&mut self, auth: &AuthSession, product: Product) -> Result<Product> {
        let bearer = Self::bearer(auth)?;
        let updated = self.api.update_product(&product, bearer).await?;
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == updated.id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_product(&mut self, auth: &AuthSession, id: &ProductId) -> Result<()> {
        let bearer = Self::bearer(auth)?;
        self.api.delete_product(id, bearer).await?;
        self.products.retain(|p| &p.id != id);
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn refresh_users(&mut self, auth: &AuthSession) -> Result<()> {
        let bearer = Self::bearer(auth)?;
        self.users = self.api.fetch_users(bearer).await?;
        Ok(())
    }

    pub async fn update_user(&mut self, auth: &AuthSession, user: UserProfile) -> Result<UserProfile> {
        let bearer = Self::bearer(auth)?;
        let updated = self.api.update_user(&user, bearer).await?;
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == updated.id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_user(&mut self, auth: &AuthSession, user_id: &str) -> Result<()> {
        let bearer = Self::bearer(auth)?;
        self.api.delete_user(user_id, bearer).await?;
        self.users.retain(|u| u.id != user_id);
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn refresh_orders(&mut self, auth: &AuthSession) -> Result<()> {
        let bearer = Self::bearer(auth)?;
        self.orders = self.api.fetch_orders(bearer).await?;
        Ok(())
    }

    pub async fn advance_order(
        &mut self,
        auth: &AuthSession,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order> {
        let bearer = Self::bearer(auth)?;
        let updated = self.api.advance_order(order_id, status, bearer).await?;
        if let Some(existing) = self.orders.iter_mut().find(|o| o.id == updated.id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DurableStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_non_admin_is_refused_before_network() {
        let dir = tempfile::tempdir().unwrap();
        let api =
            Arc::new(ApiClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap());
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        let auth = AuthSession::new(api.clone(), store);

        let mut panel = AdminPanel::new(api);
        let err = panel.refresh_users(&auth).await.unwrap_err();
        assert!(matches!(err, StoreError::Forbidden));
    }
}
