use super::{build_orchestrator, AppContext};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use reelnotes_core::SearchHistory;
use serde_json::json;

pub async fn run_history(clear: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    if clear {
        clear_history(ctx)?;
        output.success("Search history cleared");
        return Ok(());
    }

    let orchestrator = build_orchestrator(ctx).await?;

    let ids = orchestrator
        .history()
        .map_err(|e| eyre!("Failed to read search history: {}", e))?;

    // Review counts are informational; a failed count shows as zero
    let mut entries = Vec::with_capacity(ids.len());
    for id in ids {
        let reviews = orchestrator.store().count(&id).await.unwrap_or(0);
        entries.push((id, reviews));
    }

    if !output.is_human() {
        let items: Vec<_> = entries
            .iter()
            .map(|(id, reviews)| json!({ "id": id, "reviews": reviews }))
            .collect();
        output.json(&json!({ "type": "history", "searches": items }));
        return Ok(());
    }

    if entries.is_empty() {
        output.info("No searches yet");
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("IMDb ID").add_attribute(Attribute::Bold),
        Cell::new("Reviews").add_attribute(Attribute::Bold),
    ]);
    for (i, (id, reviews)) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(id),
            Cell::new(reviews),
        ]);
    }
    println!("{}", table);

    Ok(())
}

/// Only touches the history file; no client or database is needed
fn clear_history(ctx: &AppContext) -> Result<()> {
    SearchHistory::new(ctx.paths.history_file())
        .clear()
        .map_err(|e| eyre!("Failed to clear search history: {}", e))
}
