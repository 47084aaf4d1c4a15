use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl AsRef<Uuid> for BookingId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<BookingId> for Uuid {
    fn from(value: BookingId) -> Self {
        value.0
    }
}
