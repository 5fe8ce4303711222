//! Shop CLI - Product detail pages in the terminal.
//!
//! Commands:
//! - `shop show` - Load a product page and print it
//! - `shop review` - Publish a review for a product
//! - `shop browse` - Interactive product page
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BrowseArgs, ConfigArgs, ReviewArgs, ShowArgs};

/// Shop CLI - Browse storefront product pages from the terminal
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storefront origin (overrides the config file)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a product page and print it
    Show(ShowArgs),

    /// Publish a review for a product
    Review(ReviewArgs),

    /// Browse a product page interactively
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let mut ctx = context::Context::load(config_path, output)?;
    if let Some(api_base) = cli.api_base {
        ctx.config.pdp.api_base = api_base;
    }
    tracing::debug!(api_base = %ctx.config.pdp.api_base, "storefront configured");

    // Execute command
    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Review(args) => commands::review::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
