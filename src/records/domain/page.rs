//! Offset pagination for list operations.

use serde::{Deserialize, Serialize};

/// Page size applied when a caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Offset/limit window over an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    skip: u64,
    limit: u64,
}

impl PageRequest {
    /// Creates a page window.
    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Builds a window from optional query values, applying defaults.
    #[must_use]
    pub fn from_optional(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self::new(skip.unwrap_or(0), limit.unwrap_or(DEFAULT_PAGE_LIMIT))
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub const fn skip(self) -> u64 {
        self.skip
    }

    /// Returns the maximum number of rows to return.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }

    /// Applies the window to an already ordered iterator.
    #[must_use]
    pub fn apply<T>(self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(limit).collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}
