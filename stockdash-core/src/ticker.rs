//! Ticker query: the single string the user types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper-case typed text the way the input box does.
pub fn normalize_input(raw: &str) -> String {
    raw.to_uppercase()
}

/// A non-empty, trimmed, upper-case ticker (or company name) query.
///
/// The empty string is the "no query" sentinel and never becomes a `Ticker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse user input. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(normalize_input(trimmed)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "ticker must not be empty".to_string())
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_no_query() {
        assert_eq!(Ticker::parse(""), None);
        assert_eq!(Ticker::parse("   "), None);
        assert_eq!(Ticker::parse("\t\n"), None);
    }

    #[test]
    fn input_is_trimmed_and_uppercased() {
        let t = Ticker::parse("  infy ").unwrap();
        assert_eq!(t.as_str(), "INFY");
        assert_eq!(t.to_string(), "INFY");
    }

    #[test]
    fn names_with_punctuation_are_kept() {
        assert_eq!(Ticker::parse("m&m").unwrap().as_str(), "M&M");
        assert_eq!(Ticker::parse("tata steel").unwrap().as_str(), "TATA STEEL");
        assert_eq!(Ticker::parse("bajaj-auto").unwrap().as_str(), "BAJAJ-AUTO");
    }

    #[test]
    fn serde_rejects_empty() {
        assert!(serde_json::from_str::<Ticker>("\"\"").is_err());
        let t: Ticker = serde_json::from_str("\"tcs\"").unwrap();
        assert_eq!(t.as_str(), "TCS");
    }
}
