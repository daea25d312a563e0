pub mod config;
pub mod history;
pub mod review;
pub mod search;
pub mod show;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use reelnotes_config::{Config, PathManager};
use reelnotes_core::{LookupOrchestrator, ReviewStore, SearchHistory};
use reelnotes_sources::ImdbClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Loaded configuration plus where it came from
pub struct AppContext {
    pub config: Config,
    pub config_file: PathBuf,
    pub paths: PathManager,
}

impl AppContext {
    pub fn database_path(&self) -> PathBuf {
        self.config.store.database_path(self.paths.data_dir())
    }
}

/// Wire the IMDb client, review store and search history together
pub async fn build_orchestrator(ctx: &AppContext) -> Result<LookupOrchestrator> {
    ctx.config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    let client = Arc::new(ImdbClient::new(&ctx.config.imdb).wrap_err("Failed to create IMDb client")?);

    let database = ctx.database_path();
    let store = ReviewStore::open(&database, ctx.config.store.pool_size)
        .await
        .wrap_err_with(|| format!("Failed to open review database at {}", database.display()))?;

    let history = SearchHistory::new(ctx.paths.history_file());

    Ok(LookupOrchestrator::new(client.clone(), client, Arc::new(store), history))
}
