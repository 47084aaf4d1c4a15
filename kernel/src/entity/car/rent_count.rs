use serde::{Deserialize, Serialize};

/// How many times a listing has been booked. Starts at 0 and only ever
/// increases, one step per inserted booking.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct RentCount(i32);

impl RentCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn incremented(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for RentCount {
    fn default() -> Self {
        Self(0)
    }
}

impl AsRef<i32> for RentCount {
    fn as_ref(&self) -> &i32 {
        &self.0
    }
}

impl From<RentCount> for i32 {
    fn from(value: RentCount) -> Self {
        value.0
    }
}
