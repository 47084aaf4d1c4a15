use serde::{Deserialize, Serialize};

/// Free-text filter over listings. Blank or whitespace-only input means
/// "no filter" and never constructs a term.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SearchTerm> for String {
    fn from(value: SearchTerm) -> Self {
        value.0
    }
}

#[cfg(test)]
mod test {
    use super::SearchTerm;

    #[test]
    fn blank_input_is_no_filter() {
        assert_eq!(SearchTerm::new(""), None);
        assert_eq!(SearchTerm::new("   "), None);
        assert_eq!(SearchTerm::new("\t\n"), None);
    }

    #[test]
    fn input_is_trimmed() {
        let term = SearchTerm::new("  suv ").unwrap();
        assert_eq!(term.as_ref(), "suv");
    }
}
