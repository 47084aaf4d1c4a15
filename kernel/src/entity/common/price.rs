use serde::{Deserialize, Serialize};

/// Non-negative amount in whole currency units. Used for the daily price of a
/// listing and the total price of a booking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    pub fn new(price: impl Into<i64>) -> Self {
        Self(price.into())
    }
}

impl AsRef<i64> for Price {
    fn as_ref(&self) -> &i64 {
        &self.0
    }
}

impl From<Price> for i64 {
    fn from(value: Price) -> Self {
        value.0
    }
}
