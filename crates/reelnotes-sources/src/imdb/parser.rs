//! Page parsing for IMDb search results and title pages.
//!
//! Everything here is a pure function over an HTML string, so the client can
//! fetch however it likes and upstream markup changes stay contained here.

use crate::error::SourceError;
use reelnotes_models::{MovieId, MovieRecord, Person};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

fn title_href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/title/(tt\d+)/").expect("title href pattern is valid"))
}

/// Extract the identifier of the first search result
///
/// Looks for the first `<div>` carrying a class that starts with `marker`,
/// then the first link of the first list inside it.
pub fn parse_search_results(html: &str, marker: &str) -> Result<MovieId, SourceError> {
    let document = Html::parse_document(html);

    let div_selector = selector("div[class]");
    let section = document
        .select(&div_selector)
        .find(|div| has_class_prefix(div, marker))
        .ok_or(SourceError::MissingElement("search result section"))?;

    let list = section
        .select(&selector("ul"))
        .next()
        .ok_or(SourceError::MissingElement("search result list"))?;

    let link = list
        .select(&selector("a"))
        .next()
        .ok_or(SourceError::MissingElement("search result link"))?;

    let href = link
        .value()
        .attr("href")
        .ok_or(SourceError::MissingElement("search result href"))?;

    debug!(href = %href, "First search result link");

    let raw_id = title_href_pattern()
        .captures(href)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or(SourceError::MissingElement("title id in search result href"))?;

    Ok(MovieId::parse(raw_id)?)
}

fn has_class_prefix(element: &ElementRef<'_>, marker: &str) -> bool {
    element.value().classes().any(|class| class.starts_with(marker))
}

/// Extract the movie record from the JSON-LD block of a title page
pub fn parse_title_page(html: &str, base_url: &str) -> Result<MovieRecord, SourceError> {
    let document = Html::parse_document(html);

    let script = document
        .select(&selector(r#"script[type="application/ld+json"]"#))
        .next()
        .ok_or(SourceError::MissingElement("structured data block"))?;

    let raw = script.text().collect::<String>();
    parse_structured_data(raw.trim(), base_url)
}

/// Map a JSON-LD movie document onto a [`MovieRecord`]
///
/// Every field is required. A single missing or mistyped field fails the
/// whole record.
pub fn parse_structured_data(json: &str, base_url: &str) -> Result<MovieRecord, SourceError> {
    let data: StructuredTitle = serde_json::from_str(json)?;
    let duration = format_duration(&data.duration)?;
    let origin = base_url.trim_end_matches('/');

    Ok(MovieRecord {
        title: data.name,
        image_url: data.image,
        trailer_url: data.trailer.embed_url,
        description: data.description,
        rating_value: data.aggregate_rating.rating_value,
        rating_count: data.aggregate_rating.rating_count,
        date_published: data.date_published,
        content_rating: data.content_rating,
        duration,
        genres: data.genre.into_vec(),
        actors: people(data.actor, origin),
        directors: people(data.director, origin),
    })
}

fn people(entries: OneOrMany<PersonRef>, origin: &str) -> Vec<Person> {
    entries
        .into_vec()
        .into_iter()
        .map(|person| {
            let profile_url = absolute_url(origin, &person.url);
            Person::new(person.name, profile_url)
        })
        .collect()
}

fn absolute_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{}", origin, path)
    }
}

/// Reformat an ISO-8601 runtime ("PT2H28M") as "2H:28M"
///
/// Both the hour and the minute component are required. Anything after the
/// minutes (e.g. seconds) is ignored.
pub fn format_duration(raw: &str) -> Result<String, SourceError> {
    let invalid = || SourceError::InvalidDuration(raw.to_string());

    let rest = raw.strip_prefix("PT").ok_or_else(invalid)?;
    let (hours, rest) = rest.split_once('H').ok_or_else(invalid)?;
    let (minutes, _) = rest.split_once('M').ok_or_else(invalid)?;

    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;

    Ok(format!("{}H:{}M", hours, minutes))
}

fn parse_component(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredTitle {
    name: String,
    image: String,
    description: String,
    trailer: Trailer,
    aggregate_rating: AggregateRating,
    content_rating: String,
    genre: OneOrMany<String>,
    date_published: String,
    actor: OneOrMany<PersonRef>,
    director: OneOrMany<PersonRef>,
    duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Trailer {
    embed_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateRating {
    rating_value: f64,
    rating_count: u64,
}

#[derive(Debug, Deserialize)]
struct PersonRef {
    name: String,
    url: String,
}

/// JSON-LD allows a single object wherever a list is expected
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
