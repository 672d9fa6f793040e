//! Sitemap-Audit main entry point
//!
//! This is the command-line interface for the Sitemap-Audit site crawler.

use anyhow::Context;
use clap::Parser;
use sitemap_audit::config::{load_config_with_hash, Config};
use sitemap_audit::output::{print_statistics, render_report, write_markdown_report, TABLE_WIDTH};
use sitemap_audit::{AuditError, Auditor};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Sitemap-Audit: cross-check a website against its sitemap
///
/// Crawls every page reachable by internal links from the given URL, reads
/// the sitemap declared in robots.txt, and reports pages found by only one
/// of the two along with response times. Without URL arguments, links are
/// read interactively from standard input.
#[derive(Parser, Debug)]
#[command(name = "sitemap-audit")]
#[command(version)]
#[command(about = "Cross-check a website against its sitemap", long_about = None)]
struct Cli {
    /// Root URLs to audit; prompts interactively when none are given
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Also write a markdown report to this path
    #[arg(short, long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    let summary_path = cli
        .summary
        .clone()
        .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    let mut auditor = Auditor::new(&config).context("Failed to build HTTP client")?;

    if cli.urls.is_empty() {
        run_interactive(&mut auditor, config_hash, summary_path.as_deref()).await
    } else {
        for url in &cli.urls {
            audit_one(&mut auditor, url, config_hash.clone(), summary_path.as_deref()).await?;
        }
        Ok(())
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_audit=info,warn"),
            1 => EnvFilter::new("sitemap_audit=debug,info"),
            2 => EnvFilter::new("sitemap_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prompts for links until end of input
async fn run_interactive(
    auditor: &mut Auditor,
    config_hash: Option<String>,
    summary_path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("\nPlease, enter the link below:\n");

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            tracing::info!("End of input, exiting");
            return Ok(());
        };
        println!("{}", "+".repeat(TABLE_WIDTH));

        audit_one(auditor, &line, config_hash.clone(), summary_path).await?;
    }
}

/// Audits one URL and prints its reports
///
/// Invalid input and transport failures are printed and swallowed so the
/// caller can move on to the next URL. The session is always reset afterwards.
async fn audit_one(
    auditor: &mut Auditor,
    url: &str,
    config_hash: Option<String>,
    summary_path: Option<&Path>,
) -> anyhow::Result<()> {
    let result = print_audit(auditor, url, config_hash, summary_path).await;
    auditor.reset();

    match result {
        Ok(()) => Ok(()),
        Err(e @ (AuditError::InvalidInput(_) | AuditError::UnsupportedTransport { .. })) => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Audit of {} failed", url.trim())),
    }
}

async fn print_audit(
    auditor: &mut Auditor,
    url: &str,
    config_hash: Option<String>,
    summary_path: Option<&Path>,
) -> Result<(), AuditError> {
    auditor.crawl_site(url).await?;

    let report = auditor.audit_report(url, config_hash).await?;
    print!("{}", render_report(&report));
    println!();
    print_statistics(&report.stats);

    if let Some(path) = summary_path {
        match write_markdown_report(&report, path) {
            Ok(()) => tracing::info!("Summary written to {}", path.display()),
            Err(e) => tracing::error!("Failed to write summary to {}: {}", path.display(), e),
        }
    }

    Ok(())
}
