//! gifscroll - Entry Point

use clap::Parser;
use gifscroll::client::{Fetcher, GiphyClient};
use gifscroll::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    EnvOverrides, Environment, ResolvedConfig,
};
use gifscroll::model::PageSize;
use gifscroll::runner::{print_results, SearchController};
use gifscroll::view::{run_tui, ColorConfig, TuiOptions};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// gifscroll - search animated GIFs from the terminal
#[derive(Parser, Debug)]
#[command(name = "gifscroll")]
#[command(version)]
#[command(about = "Search animated GIFs and scroll through the results")]
pub struct Args {
    /// Search term to run on startup
    pub term: Option<String>,

    /// Deployment environment; selects the API key
    #[arg(long, value_enum)]
    pub env: Option<Environment>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Results requested per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Print results as JSON lines instead of starting the TUI
    #[arg(long, requires = "term")]
    pub print: bool,

    /// Pages to fetch in print mode (must be positive)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

/// Resolve settings through Defaults → Config File → Env Vars → CLI Args.
fn resolve_config(args: &Args) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    let env = EnvOverrides::from_process_env();

    // 1. Load config file (or None if missing)
    let config_file = load_config_with_precedence(args.config.clone())?;

    // 2. Merge with defaults
    let merged = merge_config(config_file.clone())?;

    // 3. Apply environment variable overrides
    let with_env = apply_env_overrides(merged, &env, config_file.as_ref())?;

    // 4. Apply CLI argument overrides (only flags the user actually set)
    let page_size = args.page_size.map(PageSize::new).transpose()?;
    Ok(apply_cli_overrides(
        with_env,
        args.env,
        page_size,
        &env,
        config_file.as_ref(),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    gifscroll::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let client = GiphyClient::new(
        config.endpoint.as_str(),
        config.require_api_key()?,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    if args.print {
        let term = args.term.as_deref().unwrap_or_default();
        let mut controller = SearchController::new(client, config.page_size);
        let mut out = io::stdout().lock();
        let summary = print_results(&mut controller, term, args.pages, &mut out)?;
        if let Some(message) = summary.status_message {
            eprintln!("{}", message);
        }
        return Ok(());
    }

    let fetcher = Fetcher::spawn(client)?;
    run_tui(
        fetcher,
        TuiOptions {
            initial_term: args.term,
            colors: ColorConfig::from_env_and_args(args.no_color),
            page_size: config.page_size,
        },
    )?;

    Ok(())
}
