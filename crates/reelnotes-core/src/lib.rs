pub mod error;
pub mod history;
pub mod orchestrator;
pub mod store;

pub use error::{ServiceError, StoreError};
pub use history::SearchHistory;
pub use orchestrator::{LookupOrchestrator, MoviePage};
pub use store::ReviewStore;
