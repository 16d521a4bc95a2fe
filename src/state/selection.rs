//! Selection criteria: what the user is currently filtering and sorting by.
//!
//! Session scoped, never persisted.

use std::fmt;
use std::str::FromStr;

/// A category filter that either matches everything or one exact value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    /// Exact-match test, `All` matches anything
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }

    /// True if any of `values` satisfies the filter. `All` matches even an
    /// empty collection.
    pub fn matches_any<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        match self {
            Filter::All => true,
            Filter::Only(expected) => values.into_iter().any(|value| value == expected),
        }
    }
}

/// Ordering applied to the filtered places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Name ascending
    #[default]
    Az,
    /// Rating descending
    Rating,
    /// Type ascending, then name ascending
    Type,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Az, SortKey::Rating, SortKey::Type];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Az => "az",
            SortKey::Rating => "rating",
            SortKey::Type => "type",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to name ordering
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "rating" => SortKey::Rating,
            "type" => SortKey::Type,
            _ => SortKey::Az,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Az => "Name (A–Z)",
            SortKey::Rating => "Rating",
            SortKey::Type => "Type",
        };
        f.write_str(label)
    }
}

/// Everything the filter/sort pipeline reads from the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Free text, matched case-insensitively after trimming
    pub query: String,
    pub kind: Filter<String>,
    pub mood: Filter<String>,
    /// Route id
    pub route: Filter<String>,
    pub sort: SortKey,
}
