pub mod error;
pub mod imdb;
pub mod traits;

pub use error::SourceError;
pub use imdb::ImdbClient;
pub use traits::{DetailExtractor, IdResolver};
