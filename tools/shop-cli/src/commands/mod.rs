//! CLI command implementations.

pub mod browse;
pub mod config;
pub mod review;
pub mod show;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use shop_pdp::{Outcome, ProductDetailView};

use crate::context::Context;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Page path of the product, e.g. /products/42/.
    pub path: String,

    /// Photo to select after loading (1-based).
    #[arg(short, long)]
    pub photo: Option<usize>,
}

/// Arguments for the review command.
#[derive(Args)]
pub struct ReviewArgs {
    /// Page path of the product, e.g. /products/42/.
    pub path: String,

    /// Reviewer name.
    #[arg(long)]
    pub author: Option<String>,

    /// Reviewer email.
    #[arg(long)]
    pub email: Option<String>,

    /// Review text.
    #[arg(long)]
    pub text: Option<String>,

    /// Rate from 1 to 5.
    #[arg(long)]
    pub rate: Option<u8>,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Page path of the product, e.g. /products/42/.
    pub path: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Mount the view and wait for its product load, with a spinner.
pub async fn load_view(view: &ProductDetailView, ctx: &Context) -> Result<Outcome> {
    let spinner = ctx
        .output
        .spinner(&format!("Loading {}", view.current_path()));
    let outcome = view.mount().await.context("Product load task failed")?;
    spinner.finish_and_clear();

    if outcome == Outcome::Failed {
        ctx.output.debug("Product could not be loaded, showing an empty page");
    }
    Ok(outcome)
}
