use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Ordered, form-encoded query parameters.
///
/// Mirrors browser `URLSearchParams` semantics for the operations the
/// dashboard needs: `get` returns the first occurrence of a key and `set`
/// overwrites it in place, so unrelated keys keep both their values and their
/// positions across navigations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parse a query string, with or without the leading `?`.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let raw = trimmed.strip_prefix('?').unwrap_or(trimmed);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Value of the first occurrence of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite the first occurrence of `key`, dropping any later duplicates,
    /// or append the pair when the key is absent.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Copy of this query with `key` set to `value`.
    pub fn with(&self, key: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encoded form without the leading `?`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.encode())
    }
}

impl FromStr for QueryString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
