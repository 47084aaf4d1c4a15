use serde::{Deserialize, Serialize};

/// 1-based page index. Anything unparsable falls back to the first page, and
/// values below 1 clamp to 1 so the derived skip can never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageNumber(u32);

impl PageNumber {
    pub fn new(page: impl Into<u32>) -> Self {
        Self(page.into().max(1))
    }

    pub fn lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .map(|value| Self(value.clamp(1, i64::from(u32::MAX)) as u32))
            .unwrap_or_default()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self(1)
    }
}

impl AsRef<u32> for PageNumber {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

impl From<PageNumber> for u32 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

/// Page size, always at least 1. The default depends on context, so callers
/// pass their own fallback to [`PageSize::lenient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSize(u32);

impl PageSize {
    pub const LISTING: PageSize = PageSize(3);
    pub const BOOKING: PageSize = PageSize(5);

    pub fn new(size: impl Into<u32>) -> Self {
        Self(size.into().max(1))
    }

    pub fn lenient(raw: Option<&str>, fallback: PageSize) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .map(|value| Self(value.clamp(1, i64::from(u32::MAX)) as u32))
            .unwrap_or(fallback)
    }
}

impl AsRef<u32> for PageSize {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// The bounded fetch window derived from page and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: PageNumber,
    size: PageSize,
}

impl PageWindow {
    pub fn new(page: PageNumber, size: PageSize) -> Self {
        Self { page, size }
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn skip(&self) -> i64 {
        i64::from(self.page.0 - 1) * i64::from(self.size.0)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size.0)
    }
}

/// One resolved page of records together with the totals describing the
/// whole filtered set. `current_page` echoes the requested page and is not
/// clamped: a page past the end simply carries no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paged<T> {
    items: Vec<T>,
    total_count: i64,
    total_pages: i64,
    current_page: PageNumber,
}

impl<T> Paged<T> {
    pub fn assemble(items: Vec<T>, total_count: i64, window: &PageWindow) -> Self {
        let total_count = total_count.max(0);
        let limit = window.limit();
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };
        Self {
            items,
            total_count,
            total_pages,
            current_page: window.page(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn current_page(&self) -> PageNumber {
        self.current_page
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}
