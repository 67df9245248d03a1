//! Stockdash CLI — one-shot snapshot commands for scripting.
//!
//! Commands:
//! - `show`: fetch a ticker and print the dashboard as plain text (or JSON)
//! - `export`: fetch a ticker and write its peer comparison CSV

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stockdash_core::present::{financial_cards, overview_cards, peer_rows, price_series};
use stockdash_core::{
    fetch_once, save_peer_csv, DashboardConfig, FetchState, IndianApiProvider, SnapshotProvider,
    StockSnapshot,
};

#[derive(Parser)]
#[command(name = "stockdash-cli", about = "Stock snapshot lookup and peer CSV export")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a ticker and print overview, price trend, financials and peers.
    Show {
        /// Ticker or company name (e.g., INFY).
        #[arg(required = true)]
        ticker: String,

        /// Print the raw snapshot as pretty JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Fetch a ticker and write peer-comparison-<TICKER>.csv.
    Export {
        /// Ticker or company name (e.g., INFY).
        #[arg(required = true)]
        ticker: String,

        /// Output directory. Defaults to the configured export dir.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let provider = IndianApiProvider::new(&config.api).context("failed to build the HTTP client")?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Show { ticker, json } => run_show(&provider, &ticker, json, &mut stdout),
        Commands::Export { ticker, out_dir } => {
            let dir = out_dir.unwrap_or(config.export.dir);
            run_export(&provider, &ticker, dir, &mut stdout)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Fetch once and hand back the stored state, or the user-facing error.
fn fetch_snapshot<P: SnapshotProvider + ?Sized>(provider: &P, ticker: &str) -> Result<FetchState> {
    let state = fetch_once(provider, ticker);
    if let Some(message) = state.error() {
        bail!("{message}");
    }
    if state.snapshot().is_none() {
        bail!("no ticker given");
    }
    Ok(state)
}

fn run_show<P, W>(provider: &P, ticker: &str, json: bool, out: &mut W) -> Result<()>
where
    P: SnapshotProvider + ?Sized,
    W: Write,
{
    let state = fetch_snapshot(provider, ticker)?;
    let Some(snapshot) = state.snapshot() else {
        bail!("no ticker given");
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, snapshot).context("failed to serialize snapshot")?;
        writeln!(out)?;
    } else {
        out.write_all(render_text(snapshot).as_bytes())?;
    }
    Ok(())
}

fn run_export<P, W>(provider: &P, ticker: &str, dir: PathBuf, out: &mut W) -> Result<()>
where
    P: SnapshotProvider + ?Sized,
    W: Write,
{
    let state = fetch_snapshot(provider, ticker)?;
    let (Some(snapshot), Some(ticker)) = (state.snapshot(), state.ticker()) else {
        bail!("no ticker given");
    };

    match save_peer_csv(&dir, ticker, snapshot.peers())
        .with_context(|| format!("failed to export peers for {ticker}"))?
    {
        Some(path) => writeln!(out, "{}", path.display())?,
        None => writeln!(out, "No peer data for {ticker}.")?,
    }
    Ok(())
}

/// Plain-text dashboard: the same derivations the TUI draws.
fn render_text(snapshot: &StockSnapshot) -> String {
    let mut s = String::new();

    s.push_str("== Overview ==\n");
    for card in overview_cards(snapshot) {
        s.push_str(&format!("{:<16} {}\n", card.title, card.value));
    }

    let series = price_series(snapshot);
    if !series.is_empty() {
        s.push_str("\n== Price Trend (NSE) ==\n");
        let pairs: Vec<String> = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| {
                if value.is_finite() {
                    format!("{label}={value}")
                } else {
                    format!("{label}=-")
                }
            })
            .collect();
        s.push_str(&pairs.join(" "));
        s.push('\n');
    }

    s.push_str("\n== Financials ==\n");
    for card in financial_cards(Some(snapshot)) {
        s.push_str(&format!("{:<38} {}\n", card.label, card.value));
    }

    let rows = peer_rows(snapshot);
    if !rows.is_empty() {
        s.push_str("\n== Peer Comparison ==\n");
        s.push_str(&format!("{:<32} {:>12} {:>20}  {}\n", "Company", "Price", "Change", "Rating"));
        for row in rows {
            s.push_str(&format!(
                "{:<32} {:>12} {:>20}  {}\n",
                row.company, row.price, row.change, row.rating
            ));
        }
    }
    s
}
