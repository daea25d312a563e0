use super::{build_orchestrator, AppContext};
use crate::output::Output;
use color_eyre::Result;

pub async fn run_review(id: &str, text: &str, ctx: &AppContext, output: &Output) -> Result<()> {
    let orchestrator = build_orchestrator(ctx).await?;
    let id = orchestrator.save_review(id, text).await?;

    output.success(format!("Review saved for {}", id));
    Ok(())
}
