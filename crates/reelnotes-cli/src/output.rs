use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// User-facing output, separate from tracing logs
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("success", Some("✓".green().to_string()), msg.as_ref());
        }
    }

    /// Shown even with --quiet, on stderr for humans
    pub fn error(&self, msg: impl AsRef<str>) {
        if self.is_human() {
            eprintln!("{} {}", "✗".red(), msg.as_ref());
        } else {
            self.message("error", None, msg.as_ref());
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("info", None, msg.as_ref());
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            self.message("warning", Some("⚠".yellow().to_string()), msg.as_ref());
        }
    }

    /// Structured command result; human callers render their own tables
    pub fn json(&self, data: &serde_json::Value) {
        if !self.quiet {
            self.write_json(data);
        }
    }

    fn message(&self, kind: &str, symbol: Option<String>, msg: &str) {
        match (self.format, symbol) {
            (OutputFormat::Human, Some(symbol)) => println!("{} {}", symbol, msg),
            (OutputFormat::Human, None) => println!("{}", msg),
            _ => self.write_json(&json!({ "type": kind, "message": msg })),
        }
    }

    fn write_json(&self, data: &serde_json::Value) {
        let rendered = match self.format {
            OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
            OutputFormat::Json | OutputFormat::Human => serde_json::to_string(data),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
