//! CodeBug CLI - renders precomputed bug analysis results

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use codebug_core::charts::{
    bug_density_chart, language_chart, severity_chart, top_files_chart,
};
use codebug_core::{render_html_report, render_json, render_text, ScanReport};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codebug")]
#[command(about = "Render bug analysis results as charts and reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a full report from a scan results JSON file
    Report {
        /// Path to the scan results JSON
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "html")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Emit a single chart configuration as JSON
    Charts {
        /// Path to the scan results JSON
        input: PathBuf,

        /// Which chart to emit
        #[arg(long)]
        kind: ChartKind,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Html,
    Json,
    Text,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ChartKind {
    Severity,
    TopFiles,
    Language,
    BugDensity,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report { input, format, output } => {
            let report = load_report(&input)?;

            let rendered = match format {
                OutputFormat::Html => render_html_report(&report),
                OutputFormat::Json => render_json(&report),
                OutputFormat::Text => render_text(&report),
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("failed to write output: {}", path.display()))?;
                    eprintln!("Report written to {}", path.display());
                }
                None => {
                    print!("{}", rendered);
                }
            }
        }
        Commands::Charts { input, kind } => {
            let report = load_report(&input)?;

            let config = match kind {
                ChartKind::Severity => severity_chart(&report.severity),
                ChartKind::TopFiles => top_files_chart(&report.top_files),
                ChartKind::Language => language_chart(&report.languages),
                ChartKind::BugDensity => bug_density_chart(&report.bug_density),
            };
            println!("{}", config);
        }
    }

    Ok(())
}

/// Load and parse a scan report, validating the path first
fn load_report(path: &Path) -> anyhow::Result<ScanReport> {
    if !path.exists() {
        anyhow::bail!("input file does not exist: {}", path.display());
    }
    ScanReport::load(path)
}
