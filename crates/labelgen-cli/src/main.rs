//! labelgen - batch packaging-box label generation
//!
//! Reads item rows from CSV, renders one label PDF per row by overlaying
//! the row's text and origin icon onto its brand template, and optionally
//! bundles the outputs into a ZIP archive.

use anyhow::{Context as _, Result};
use clap::Parser;
use labelgen::{bundle, row, Composer};
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "labelgen",
    version,
    about = "Generate packaging-box label PDFs from CSV data",
    after_help = "EXAMPLES:\n  \
                  labelgen --data items.csv --templates ./templates --icons ./icons \\\n    \
                  --font NotoSansKR-Medium.ttf --coords coords.json --out-dir ./out\n\n  \
                  # First two rows only, bundled into a ZIP\n  \
                  labelgen --data items.csv --templates ./templates --icons ./icons \\\n    \
                  --font NotoSansKR-Medium.ttf --coords coords.json --out-dir ./out \\\n    \
                  --limit 2 --zip labels.zip"
)]
struct Cli {
    /// CSV file with the item rows
    #[arg(long)]
    data: PathBuf,

    /// Root directory of brand template PDFs (<root>/<brand>/<file>.pdf)
    #[arg(long)]
    templates: PathBuf,

    /// Directory of origin icons (icon_<CODE>.png)
    #[arg(long)]
    icons: PathBuf,

    /// TrueType typeface used for all overlay text
    #[arg(long)]
    font: PathBuf,

    /// Coordinate registry JSON
    #[arg(long)]
    coords: PathBuf,

    /// Output directory for rendered labels
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Maximum number of labels to render (0 = all rows)
    #[arg(long, default_value_t = 0)]
    limit: usize,

    /// Bundle the outputs into a ZIP archive at this path
    #[arg(long)]
    zip: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let rows = row::read_rows(&cli.data)
        .with_context(|| format!("Failed to read input rows from {}", cli.data.display()))?;

    let mut composer = Composer::from_paths(
        &cli.coords,
        &cli.font,
        &cli.templates,
        &cli.icons,
        &cli.out_dir,
    )?;

    // Advisory only: rows with these codes render the text fallback
    let missing = composer.icons().missing_codes(&rows);
    if !missing.is_empty() {
        warn!("No icon art for origin codes: {}", missing.join(", "));
    }

    let outputs = composer.render_batch(&rows, cli.limit)?;

    for path in &outputs {
        println!("{}", path.display());
    }

    if let Some(zip_path) = &cli.zip {
        bundle::bundle_outputs(&outputs, zip_path)?;
        println!("{}", zip_path.display());
    }

    Ok(())
}
