use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Canonical IMDb title identifier ("tt" followed by 6 to 11 digits)
///
/// The only way to build one is through [`MovieId::parse`], so any `MovieId`
/// handed to a source is already known to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MovieId(String);

fn canonical_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^tt\d{6,11}$").expect("canonical id pattern is valid"))
}

impl MovieId {
    /// Parse a canonical identifier. The input is matched verbatim: no trimming,
    /// no case folding.
    pub fn parse(value: &str) -> Result<Self, InvalidMovieId> {
        if Self::is_canonical(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(InvalidMovieId(value.to_string()))
        }
    }

    /// Check whether `value` already has the canonical shape
    pub fn is_canonical(value: &str) -> bool {
        canonical_pattern().is_match(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MovieId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MovieId {
    type Err = InvalidMovieId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MovieId {
    type Error = InvalidMovieId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MovieId> for String {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

/// Returned when a string does not match `^tt\d{6,11}$`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMovieId(pub String);

impl fmt::Display for InvalidMovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a canonical IMDb title id", self.0)
    }
}

impl std::error::Error for InvalidMovieId {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_six_to_eleven_digits() {
        assert!(MovieId::parse("tt011116").is_ok());
        assert!(MovieId::parse("tt0111161").is_ok());
        assert!(MovieId::parse("tt12345678901").is_ok());
    }

    #[test]
    fn test_parse_rejects_wrong_shapes() {
        assert!(MovieId::parse("tt12345").is_err());
        assert!(MovieId::parse("tt123456789012").is_err());
        assert!(MovieId::parse("TT0111161").is_err());
        assert!(MovieId::parse("nm0000151").is_err());
        assert!(MovieId::parse(" tt0111161").is_err());
        assert!(MovieId::parse("tt0111161/").is_err());
        assert!(MovieId::parse("The Shawshank Redemption").is_err());
        assert!(MovieId::parse("").is_err());
    }

    #[test]
    fn test_display_is_verbatim() {
        let id = MovieId::parse("tt0111161").unwrap();
        assert_eq!(id.to_string(), "tt0111161");
        assert_eq!(id.as_str(), "tt0111161");
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let id: MovieId = serde_json::from_str("\"tt0068646\"").unwrap();
        assert_eq!(id.as_str(), "tt0068646");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tt0068646\"");

        let bad: Result<MovieId, _> = serde_json::from_str("\"godfather\"");
        assert!(bad.is_err());
    }
}
