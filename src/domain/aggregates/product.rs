//! Product record

use crate::domain::value_objects::{Money, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A catalog product as served by the backend. Immutable outside admin
/// mutation; catalog, cart and wishlist hold snapshots of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rating: Decimal,
}

/// Admin payload for creating or replacing a product. The backend generates
/// an id when none is supplied.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom = "validate_price")]
    pub price: Money,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    #[validate(custom = "validate_rating")]
    pub rating: Decimal,
}

fn validate_price(price: &Money) -> Result<(), ValidationError> {
    if price.amount() < Decimal::ZERO {
        return Err(ValidationError::new("price_negative"));
    }
    Ok(())
}

fn validate_rating(rating: &Decimal) -> Result<(), ValidationError> {
    if *rating < Decimal::ZERO || *rating > Decimal::from(5) {
        return Err(ValidationError::new("rating_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id).unwrap(),
            name: format!("Product {id}"),
            price: Money::from_cents(cents),
            description: String::new(),
            image: String::new(),
            category: "Stationery".into(),
            rating: Decimal::new(45, 1),
        }
    }

    #[test]
    fn test_new_product_validation() {
        let good = NewProduct {
            id: None,
            name: "Sustainable Peace Journal".into(),
            price: Money::from_cents(2499),
            description: String::new(),
            image: String::new(),
            category: "Stationery".into(),
            rating: Decimal::new(48, 1),
        };
        assert!(good.validate().is_ok());

        let mut bad = good.clone();
        bad.name = String::new();
        assert!(bad.validate().is_err());

        let mut bad = good.clone();
        bad.rating = Decimal::from(6);
        assert!(bad.validate().is_err());

        let mut bad = good;
        bad.price = Money::from_cents(-1);
        assert!(bad.validate().is_err());
    }
}
