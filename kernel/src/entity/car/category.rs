use serde::{Deserialize, Serialize};

/// Vehicle class of a listing (SUV, sedan, ...). Serialized as `type` on the
/// wire; kept as plain text like every other searchable field.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CarCategory(String);

impl CarCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}

impl AsRef<str> for CarCategory {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CarCategory> for String {
    fn from(value: CarCategory) -> Self {
        value.0
    }
}
