//! Value objects shared across the storefront

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

/// Canonical product identifier (opaque string, e.g. `P001`).
///
/// The backend issues string identifiers; every layer of the storefront keys
/// products by this type and nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Result<Self, ProductIdError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ProductIdError::Empty);
        }
        if value.len() > 64 {
            return Err(ProductIdError::TooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum ProductIdError {
    Empty,
    TooLong,
}
impl std::error::Error for ProductIdError {}
impl fmt::Display for ProductIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "product id empty"),
            Self::TooLong => write!(f, "product id too long"),
        }
    }
}

/// USD monetary amount. Exact internally; rounding happens only at the
/// display and minor-unit boundaries.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Minor units (cents), rounding halves away from zero.
    pub fn to_cents(&self) -> i64 {
        (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    }

    /// Display value rounded to two decimal places, halves away from zero.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Money;
    fn mul(self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;
    fn mul(self, rate: Decimal) -> Money {
        Money(self.0 * rate)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id() {
        let id = ProductId::new("  P001 ").unwrap();
        assert_eq!(id.as_str(), "P001");
        assert!(ProductId::new("   ").is_err());
    }

    #[test]
    fn test_money_cents() {
        assert_eq!(Money::new(Decimal::new(599684, 4)).to_cents(), 5997);
        assert_eq!(Money::from_cents(599).to_cents(), 599);
        assert_eq!(Money::new(Decimal::new(105, 2)).to_cents(), 105);
    }

    #[test]
    fn test_money_display_rounding() {
        let total = Money::new(Decimal::new(599684, 4));
        assert_eq!(total.to_string(), "59.97");
        assert_eq!(Money::from_cents(599).to_string(), "5.99");
    }

    #[test]
    fn test_money_arithmetic() {
        let price = Money::from_cents(2499);
        assert_eq!((price * 2u32).to_cents(), 4998);
        assert_eq!((price + Money::from_cents(1)).to_cents(), 2500);
    }
}
