//! Publish a product review.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};
use shop_pdp::{Outcome, ProductDetailView, DEFAULT_RATE, RATE_MAX, RATE_MIN};

use super::{load_view, ReviewArgs};
use crate::context::Context;
use crate::render::render_reviews;

/// Run the review command.
pub async fn run(args: ReviewArgs, ctx: &Context) -> Result<()> {
    let view = ctx.product_view(&args.path)?;
    load_view(&view, ctx).await?;

    let author = field_or_prompt(args.author, "Your name", ctx)?;
    let email = field_or_prompt(args.email, "Email", ctx)?;
    let text = field_or_prompt(args.text, "Review", ctx)?;
    let rate = match args.rate {
        Some(rate) => rate,
        None if ctx.output.is_interactive() => prompt_rate()?,
        None => DEFAULT_RATE,
    };

    view.update_review(|draft| {
        draft.author = author;
        draft.email = email;
        draft.text = text;
        draft.rate = rate;
    });

    publish(&view, ctx).await
}

/// Submit the view's draft and print the resulting review list.
pub async fn publish(view: &ProductDetailView, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Publishing review");
    let outcome = view.submit_review().await;
    spinner.finish_and_clear();

    match outcome {
        Outcome::Applied => {
            let state = view.snapshot();
            if ctx.output.is_json() {
                ctx.output.json(&state.product.reviews());
            } else {
                render_reviews(&ctx.output, &state.product.product_reviews());
            }
            Ok(())
        }
        Outcome::Skipped => {
            ctx.output.debug("A review is already being published");
            Ok(())
        }
        Outcome::Failed => bail!("Review was not published"),
    }
}

fn field_or_prompt(value: Option<String>, prompt: &str, ctx: &Context) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if ctx.output.is_interactive() => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

/// Ask for a rate, highest first.
pub fn prompt_rate() -> Result<u8> {
    let rates: Vec<u8> = (RATE_MIN..=RATE_MAX).rev().collect();
    let items: Vec<String> = rates
        .iter()
        .map(|r| format!("{} {}", "★".repeat(*r as usize), r))
        .collect();
    let default = rates.iter().position(|r| *r == DEFAULT_RATE).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Rate")
        .items(&items)
        .default(default)
        .interact()?;

    Ok(rates[selection])
}
