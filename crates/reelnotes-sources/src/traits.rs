use crate::error::SourceError;
use async_trait::async_trait;
use reelnotes_models::{MovieId, MovieRecord};

/// Turns free-text titles into canonical identifiers
#[async_trait]
pub trait IdResolver: Send + Sync {
    fn source_name(&self) -> &str;

    /// Identifier of the top search result for `query`
    async fn resolve(&self, query: &str) -> Result<MovieId, SourceError>;
}

/// Fetches the full record for a known identifier
#[async_trait]
pub trait DetailExtractor: Send + Sync {
    fn source_name(&self) -> &str;

    /// Either every field of the record, or an error. Never a partial record.
    async fn extract(&self, id: &MovieId) -> Result<MovieRecord, SourceError>;
}
