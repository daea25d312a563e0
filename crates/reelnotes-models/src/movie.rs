use serde::{Deserialize, Serialize};

/// Everything shown on a movie page, scraped from the title's structured data
///
/// A record is only ever built with every field present; sources return an
/// error instead of a partially filled record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub image_url: String,
    pub trailer_url: String,
    pub description: String,
    pub rating_value: f64,
    pub rating_count: u64,
    pub date_published: String,
    pub content_rating: String, // PG-13, R, etc
    /// Display-ready runtime, e.g. "2H:28M"
    pub duration: String,
    pub genres: Vec<String>,
    pub actors: Vec<Person>,
    pub directors: Vec<Person>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    /// Absolute profile URL
    pub profile_url: String,
}

impl Person {
    pub fn new(name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: profile_url.into(),
        }
    }
}

impl MovieRecord {
    /// Comma separated genre list for display
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }
}
