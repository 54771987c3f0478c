//! CivicConnect Storefront
//!
//! E-commerce storefront core: a REST backend for products, users, auth and
//! payments, plus the client-side session engines a UI host drives.
//!
//! ## Features
//! - Product catalog with filter/sort/search
//! - Shopping cart with derived totals
//! - Durable wishlist and auth session
//! - Checkout orchestration against a payment processor
//! - Admin aggregation over products, users and orders

use thiserror::Error;

pub mod checkout;
pub mod client;
pub mod config;
pub mod domain;
pub mod server;
pub mod session;
pub mod storage;

pub use client::ApiClient;
pub use domain::aggregates::{Cart, CartError, CartLine, Order, OrderStatus, Product, Wishlist};
pub use domain::value_objects::{Money, ProductId};
pub use session::Session;
pub use storage::DurableStore;

// =============================================================================
// Error Types
// =============================================================================

/// Client-side error taxonomy. Validation failures never reach the network;
/// auth and payment errors carry a message fit to surface to the user.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already in use")]
    EmailInUse,

    #[error("admin access required")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(String),

    #[error("payment error: {0}")]
    Payment(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("malformed stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        StoreError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
