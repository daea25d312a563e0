use crate::error::ServiceError;
use crate::history::SearchHistory;
use crate::store::ReviewStore;
use reelnotes_models::{MovieId, MovieRecord, Review};
use reelnotes_sources::{DetailExtractor, IdResolver};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything needed to show one movie
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub id: MovieId,
    pub record: MovieRecord,
    pub reviews: Vec<Review>,
}

/// Drives search → resolve → extract → store for the front end
///
/// Source failures never cross this boundary with their cause: they are
/// logged here and reported as `ServiceError::NotFound`.
pub struct LookupOrchestrator {
    resolver: Arc<dyn IdResolver>,
    extractor: Arc<dyn DetailExtractor>,
    store: Arc<ReviewStore>,
    history: SearchHistory,
}

impl LookupOrchestrator {
    pub fn new(
        resolver: Arc<dyn IdResolver>,
        extractor: Arc<dyn DetailExtractor>,
        store: Arc<ReviewStore>,
        history: SearchHistory,
    ) -> Self {
        Self {
            resolver,
            extractor,
            store,
            history,
        }
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Turn user input into a canonical id
    ///
    /// Input that already looks like an id is used verbatim; anything else
    /// goes through the resolver. Successful searches are remembered.
    pub async fn search(&self, input: &str) -> Result<MovieId, ServiceError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ServiceError::Validation("Movie name is missing".to_string()));
        }

        let id = match MovieId::parse(input) {
            Ok(id) => {
                debug!(imdb_id = %id, "Search input is already a title id");
                id
            }
            Err(_) => match self.resolver.resolve(input).await {
                Ok(id) => id,
                Err(e) => {
                    warn!(
                        query = %input,
                        source = self.resolver.source_name(),
                        error = %e,
                        "Failed to resolve title id"
                    );
                    return Err(ServiceError::NotFound("Unable to find IMDb id for this movie name"));
                }
            },
        };

        if let Err(e) = self.history.record(&id) {
            warn!(imdb_id = %id, error = %e, "Failed to update search history");
        }

        Ok(id)
    }

    /// Movie details plus stored reviews
    pub async fn movie_page(&self, id: &str) -> Result<MoviePage, ServiceError> {
        let not_found = ServiceError::NotFound("Unable to find movie details for this movie");

        let id = match MovieId::parse(id.trim()) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Refusing to look up non-canonical id");
                return Err(not_found);
            }
        };

        let record = match self.extractor.extract(&id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    imdb_id = %id,
                    source = self.extractor.source_name(),
                    error = %e,
                    "Failed to extract movie details"
                );
                return Err(not_found);
            }
        };

        let reviews = self.store.read(&id).await;
        debug!(imdb_id = %id, reviews = reviews.len(), "Loaded movie page");

        Ok(MoviePage { id, record, reviews })
    }

    /// Store an anonymous review for `id`
    pub async fn save_review(&self, id: &str, content: &str) -> Result<MovieId, ServiceError> {
        let id = MovieId::parse(id.trim())
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        if content.trim().is_empty() {
            return Err(ServiceError::Validation("Review is missing".to_string()));
        }

        self.store.write(&id, content).await?;
        info!(imdb_id = %id, "Saved review");
        Ok(id)
    }

    pub fn history(&self) -> anyhow::Result<Vec<MovieId>> {
        self.history.load()
    }

    pub fn clear_history(&self) -> anyhow::Result<()> {
        self.history.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelnotes_models::Person;
    use reelnotes_sources::SourceError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FakeResolver {
        result: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdResolver for FakeResolver {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn resolve(&self, _query: &str) -> Result<MovieId, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.result {
                Some(id) => Ok(MovieId::parse(id)?),
                None => Err(SourceError::MissingElement("search result section")),
            }
        }
    }

    struct FakeExtractor {
        found: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DetailExtractor for FakeExtractor {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn extract(&self, id: &MovieId) -> Result<MovieRecord, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.found {
                return Err(SourceError::Timeout {
                    url: format!("https://www.imdb.com/title/{}", id),
                });
            }
            Ok(MovieRecord {
                title: "The Shawshank Redemption".to_string(),
                image_url: "https://m.media-amazon.com/images/M/shawshank.jpg".to_string(),
                trailer_url: "https://www.imdb.com/video/imdb/vi3877612057".to_string(),
                description: "Two imprisoned men bond over a number of years.".to_string(),
                rating_value: 9.3,
                rating_count: 2_800_000,
                date_published: "1994-10-14".to_string(),
                content_rating: "R".to_string(),
                duration: "2H:22M".to_string(),
                genres: vec!["Drama".to_string()],
                actors: vec![Person::new("Tim Robbins", "https://www.imdb.com/name/nm0000209/")],
                directors: vec![Person::new("Frank Darabont", "https://www.imdb.com/name/nm0001104/")],
            })
        }
    }

    struct Harness {
        _dir: TempDir,
        resolver: Arc<FakeResolver>,
        extractor: Arc<FakeExtractor>,
        orchestrator: LookupOrchestrator,
    }

    async fn harness(resolved: Option<&'static str>, found: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let store = ReviewStore::open(&dir.path().join("Movies.db"), 1).await.unwrap();
        let resolver = Arc::new(FakeResolver {
            result: resolved,
            calls: AtomicUsize::new(0),
        });
        let extractor = Arc::new(FakeExtractor {
            found,
            calls: AtomicUsize::new(0),
        });
        let orchestrator = LookupOrchestrator::new(
            resolver.clone(),
            extractor.clone(),
            Arc::new(store),
            SearchHistory::new(dir.path().join("history.json")),
        );
        Harness {
            _dir: dir,
            resolver,
            extractor,
            orchestrator,
        }
    }

    #[tokio::test]
    async fn test_canonical_input_bypasses_resolver() {
        let h = harness(Some("tt0068646"), true).await;

        for input in ["tt0111161", "tt011116", "tt12345678901", "  tt0111161  "] {
            let id = h.orchestrator.search(input).await.unwrap();
            assert_eq!(id.as_str(), input.trim());
        }
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_title_input_goes_through_resolver() {
        let h = harness(Some("tt0111161"), true).await;

        let id = h.orchestrator.search("shawshank redemption").await.unwrap();
        assert_eq!(id.as_str(), "tt0111161");
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 1);

        // Looks like an id but is too short, so it is treated as a title
        h.orchestrator.search("tt12345").await.unwrap();
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_search_fails_before_resolver() {
        let h = harness(Some("tt0111161"), true).await;

        for input in ["", "   ", "\n\t"] {
            let err = h.orchestrator.search(input).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
        assert_eq!(h.resolver.calls.load(Ordering::SeqCst), 0);
        assert!(h.orchestrator.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolver_failure_is_not_found() {
        let h = harness(None, true).await;

        let err = h.orchestrator.search("zzzzzzzzzz").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(h.orchestrator.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_records_history() {
        let h = harness(Some("tt0111161"), true).await;

        h.orchestrator.search("shawshank").await.unwrap();
        h.orchestrator.search("tt0068646").await.unwrap();
        h.orchestrator.search("tt0111161").await.unwrap();

        let history: Vec<String> = h
            .orchestrator
            .history()
            .unwrap()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(history, vec!["tt0111161", "tt0068646"]);

        h.orchestrator.clear_history().unwrap();
        assert!(h.orchestrator.history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_movie_page_includes_reviews() {
        let h = harness(None, true).await;

        h.orchestrator.save_review("tt0111161", "Great film").await.unwrap();
        h.orchestrator.save_review("tt0068646", "Different movie").await.unwrap();

        let page = h.orchestrator.movie_page("tt0111161").await.unwrap();
        assert_eq!(page.id.as_str(), "tt0111161");
        assert_eq!(page.record.title, "The Shawshank Redemption");
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.reviews[0].content, "Great film");
    }

    #[tokio::test]
    async fn test_movie_page_extraction_failure_is_not_found() {
        let h = harness(None, false).await;

        let err = h.orchestrator.movie_page("tt0111161").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(h.extractor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_movie_page_non_canonical_id_skips_extractor() {
        let h = harness(None, true).await;

        let err = h.orchestrator.movie_page("the godfather").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(h.extractor.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_save_review_validation() {
        let h = harness(None, true).await;

        let err = h.orchestrator.save_review("tt0111161", "   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = h.orchestrator.save_review("godfather", "Great").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        assert_eq!(h.orchestrator.store().count(&MovieId::parse("tt0111161").unwrap()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_review_store_failure() {
        let h = harness(None, true).await;
        h.orchestrator.store().close().await;

        let err = h.orchestrator.save_review("tt0111161", "Great film").await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
    }
}
