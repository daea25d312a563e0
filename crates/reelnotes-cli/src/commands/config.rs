use super::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use reelnotes_config::Config;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Init { force } => init_config(force, ctx, output),
        ConfigCommands::Path => show_paths(ctx, output),
    }
}

fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;

    if !output.is_human() {
        let value = serde_json::to_value(config).map_err(|e| eyre!("Failed to serialize config: {}", e))?;
        output.json(&json!({
            "type": "config",
            "file": ctx.config_file.display().to_string(),
            "exists": ctx.config_file.exists(),
            "config": value,
        }));
        return Ok(());
    }

    if !ctx.config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}, showing defaults",
            ctx.config_file.display()
        ));
        output.info("Run 'reelnotes config init' to write them to disk.");
    }

    if output.is_quiet() {
        return Ok(());
    }

    let mut imdb_table = section_table("IMDb");
    imdb_table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.imdb.base_url)]);
    imdb_table.add_row(vec![Cell::new("User-Agent"), Cell::new(&config.imdb.user_agent)]);
    imdb_table.add_row(vec![
        Cell::new("Timeout"),
        Cell::new(format!("{} seconds", config.imdb.timeout_secs)),
    ]);
    imdb_table.add_row(vec![Cell::new("Search Marker"), Cell::new(&config.imdb.search_marker)]);
    println!("{}", imdb_table);
    println!();

    let mut store_table = section_table("Review Store");
    store_table.add_row(vec![
        Cell::new("Database"),
        Cell::new(ctx.database_path().display()),
    ]);
    store_table.add_row(vec![Cell::new("Pool Size"), Cell::new(config.store.pool_size)]);
    println!("{}", store_table);
    println!();

    let mut logging_table = section_table("Logging");
    logging_table.add_row(vec![Cell::new("Level"), Cell::new(&config.logging.level)]);
    logging_table.add_row(vec![
        Cell::new("JSON"),
        Cell::new(match config.logging.json {
            Some(true) => "✓".green().to_string(),
            Some(false) => "✗".red().to_string(),
            None => "auto".bright_black().to_string(),
        }),
    ]);
    logging_table.add_row(vec![
        Cell::new("File"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    println!("{}", logging_table);

    match config.validate() {
        Ok(()) => output.success("Configuration is valid"),
        Err(e) => output.warn(format!("Configuration is invalid: {}", e)),
    }

    Ok(())
}

fn init_config(force: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let path = &ctx.config_file;

    if path.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

    Config::default()
        .save_to_file(path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", path.display(), e))?;

    output.success(format!("Configuration written to {}", path.display()));
    Ok(())
}

fn show_paths(ctx: &AppContext, output: &Output) -> Result<()> {
    let rows = [
        ("config", ctx.config_file.clone()),
        ("data", ctx.paths.data_dir().to_path_buf()),
        ("database", ctx.database_path()),
        ("history", ctx.paths.history_file()),
        ("logs", ctx.paths.log_dir().to_path_buf()),
    ];

    if !output.is_human() {
        let map: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(name, path)| (name.to_string(), json!(path.display().to_string())))
            .collect();
        output.json(&json!({ "type": "paths", "paths": map }));
        return Ok(());
    }

    for (name, path) in &rows {
        output.info(format!("{:<10} {}", name, path.display()));
    }
    Ok(())
}

fn section_table(title: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
