use serde::{Deserialize, Serialize};

/// Client-facing sort keys. Unknown or absent input maps to `Newest`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    pub fn lenient(raw: Option<&str>) -> Self {
        match raw {
            Some("newest") => SortKey::Newest,
            Some("oldest") => SortKey::Oldest,
            Some("price-low") => SortKey::PriceLow,
            Some("price-high") => SortKey::PriceHigh,
            _ => SortKey::Newest,
        }
    }

    /// The one consistent mapping: price-low is ascending, price-high is
    /// descending. Recency always means the creation timestamp of the record
    /// kind being listed.
    pub fn ordering(&self) -> (SortField, SortDirection) {
        match self {
            SortKey::Newest => (SortField::Recency, SortDirection::Descending),
            SortKey::Oldest => (SortField::Recency, SortDirection::Ascending),
            SortKey::PriceLow => (SortField::Price, SortDirection::Ascending),
            SortKey::PriceHigh => (SortField::Price, SortDirection::Descending),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Recency,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[cfg(test)]
mod test {
    use super::{SortDirection, SortField, SortKey};

    #[test]
    fn unknown_input_maps_to_newest() {
        assert_eq!(SortKey::lenient(None), SortKey::Newest);
        assert_eq!(SortKey::lenient(Some("")), SortKey::Newest);
        assert_eq!(SortKey::lenient(Some("cheapest")), SortKey::Newest);
    }

    #[test]
    fn known_keys_parse() {
        assert_eq!(SortKey::lenient(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::lenient(Some("oldest")), SortKey::Oldest);
        assert_eq!(SortKey::lenient(Some("price-low")), SortKey::PriceLow);
        assert_eq!(SortKey::lenient(Some("price-high")), SortKey::PriceHigh);
    }

    #[test]
    fn price_directions_are_not_inverted() {
        assert_eq!(
            SortKey::PriceLow.ordering(),
            (SortField::Price, SortDirection::Ascending)
        );
        assert_eq!(
            SortKey::PriceHigh.ordering(),
            (SortField::Price, SortDirection::Descending)
        );
    }
}
