pub mod client;
pub mod parser;

pub use client::ImdbClient;
pub use parser::{format_duration, parse_search_results, parse_structured_data, parse_title_page};
