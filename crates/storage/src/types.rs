//! Supporting types for the book storage system.

use serde::{Deserialize, Serialize};

/// Unique identifier for a book within the storage system.
///
/// Wraps the SQLite row id so it cannot be confused with other integer
/// columns such as `book_number` or `page_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl BookId {
    /// Create a new BookId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BookId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// An explicit set of `old -> new` series name mappings.
///
/// Pairs keep the order they were supplied in. Each pair is applied to the
/// rows that carried `old` before the batch started, so mappings never chain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeriesRenames {
    pairs: Vec<(String, String)>,
}

impl SeriesRenames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. Pairs with an empty side or identical names are ignored.
    pub fn rename(mut self, old: impl Into<String>, new: impl Into<String>) -> Self {
        self.push(old, new);
        self
    }

    pub fn push(&mut self, old: impl Into<String>, new: impl Into<String>) {
        let (old, new) = (old.into(), new.into());
        if old.is_empty() || new.is_empty() || old == new {
            return;
        }
        self.pairs.push((old, new));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(o, n)| (o.as_str(), n.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SeriesRenames {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut renames = Self::new();
        for (old, new) in iter {
            renames.push(old, new);
        }
        renames
    }
}
