//! Strongly typed identifiers for pagination state.

/// Strongly typed pagination cursor.
///
/// Backends either return an explicit continuation token in `next_page` or
/// rely on a plain 1-based page counter; both are represented by this type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct PageCursor(pub u64);

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl PageCursor {
    /// The first page of a feed.
    pub const FIRST: Self = PageCursor(1);

    pub fn new(value: u64) -> Self {
        PageCursor(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The page-counter successor. Only meaningful for backends that
    /// paginate by plain increment instead of an explicit token.
    pub fn bumped(&self) -> Self {
        PageCursor(self.0 + 1)
    }
}

impl std::fmt::Display for PageCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing tag identifying which reset epoch a fetch
/// belongs to. Responses tagged with an older generation are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn first() -> Self {
        Generation(0)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advance to the next epoch.
    pub fn bump(&mut self) {
        self.0 += 1;
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity key derived from an item, used to detect duplicates caused by
/// backend pagination overlap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(value: impl Into<String>) -> Self {
        ItemKey(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        ItemKey(value.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        ItemKey(value)
    }
}
