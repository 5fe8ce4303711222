//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let pdp = &ctx.config.pdp;
    ctx.output.header("Current Configuration");

    ctx.output.line("");
    ctx.output.line("[pdp]");
    ctx.output.kv("api_base", &pdp.api_base);
    ctx.output.kv("review_published_message", &pdp.review_published_message);
    ctx.output.kv("submit_error_message", &pdp.submit_error_message);
    ctx.output.kv("guard_photo_index", &pdp.guard_photo_index.to_string());
    ctx.output.kv("guard_double_submit", &pdp.guard_double_submit.to_string());
    ctx.output.kv("surface_submit_errors", &pdp.surface_submit_errors.to_string());

    let logging = &ctx.config.logging;
    ctx.output.line("");
    ctx.output.line("[logging]");
    ctx.output.kv("format", &logging.format);
    ctx.output.kv("level", &logging.level);

    if ctx.output.is_verbose() {
        ctx.output.line("");
        ctx.output.line("Searched for:");
        for name in &CONFIG_NAMES {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created {}", config_path.display()));
    ctx.output.info("Point api_base at your storefront and run `shop show /products/<id>/`");

    Ok(())
}
