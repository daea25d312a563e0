use super::show::render_page;
use super::{build_orchestrator, AppContext};
use crate::output::Output;
use color_eyre::Result;

/// Resolve the query, then show the movie it points at
pub async fn run_search(query: &str, ctx: &AppContext, output: &Output) -> Result<()> {
    tracing::debug!(query = %query, "Search command started");

    let orchestrator = build_orchestrator(ctx).await?;
    let id = orchestrator.search(query).await?;
    let page = orchestrator.movie_page(id.as_str()).await?;

    render_page(&page, output);
    Ok(())
}
