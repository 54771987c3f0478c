//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartError, CartLine, CartTotals};
pub use order::{Order, OrderLine, OrderStatus};
pub use product::{NewProduct, Product};
pub use user::{NotificationPrefs, Role, UserProfile};
pub use wishlist::Wishlist;
