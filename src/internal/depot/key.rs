use std::borrow::Borrow;
use std::fmt;

/// Separator between namespace segments of a depot key
pub const SEPARATOR: char = '\\';

/// Registry key with trailing separators trimmed.
///
/// `Foo\Bar` and `Foo\Bar\\` normalize to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepotKey(Box<str>);

impl DepotKey {
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw).into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Candidate keys for hierarchical lookup, longest first.
    ///
    /// `A\B\C` yields `A\B\C`, `A\B`, `A`. Every candidate is normalized,
    /// so empty segments collapse into their parent.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> + '_ {
        let key = self.as_str();
        std::iter::once(key).chain(
            key.rmatch_indices(SEPARATOR)
                .map(move |(idx, _)| normalize(&key[..idx])),
        )
    }
}

/// Trim trailing separators from a raw key
pub fn normalize(raw: &str) -> &str {
    raw.trim_end_matches(SEPARATOR)
}

impl Borrow<str> for DepotKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DepotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DepotKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
