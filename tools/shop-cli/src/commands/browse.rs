//! Interactive product page.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};

use super::review::{prompt_rate, publish};
use super::{load_view, BrowseArgs};
use crate::context::Context;
use crate::render::{render_gallery, render_view};

/// Actions offered on each turn, in menu order.
const ACTIONS: [Action; 7] = [
    Action::NextPhoto,
    Action::PreviousPhoto,
    Action::MoreUnits,
    Action::FewerUnits,
    Action::WriteReview,
    Action::Reload,
    Action::Quit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    NextPhoto,
    PreviousPhoto,
    MoreUnits,
    FewerUnits,
    WriteReview,
    Reload,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::NextPhoto => "Next photo",
            Action::PreviousPhoto => "Previous photo",
            Action::MoreUnits => "Quantity +1",
            Action::FewerUnits => "Quantity -1",
            Action::WriteReview => "Write a review",
            Action::Reload => "Reload product",
            Action::Quit => "Quit",
        }
    }
}

/// Photo index after stepping `forward` or back, wrapping around.
fn step_photo(active: usize, images: usize, forward: bool) -> usize {
    if images == 0 {
        return active;
    }
    let active = active.min(images - 1);
    if forward {
        (active + 1) % images
    } else {
        (active + images - 1) % images
    }
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if !ctx.output.is_interactive() {
        bail!("browse needs an interactive terminal; use `shop show` instead");
    }

    let view = ctx.product_view(&args.path)?;
    load_view(&view, ctx).await?;
    render_view(&ctx.output, &view.snapshot());

    let labels: Vec<&str> = ACTIONS.iter().map(Action::label).collect();
    loop {
        let selection = Select::new()
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        match ACTIONS[selection] {
            Action::NextPhoto | Action::PreviousPhoto => {
                let state = view.snapshot();
                let forward = ACTIONS[selection] == Action::NextPhoto;
                let next = step_photo(state.active_photo, state.product.images().len(), forward);
                view.set_active_photo(next);
                render_gallery(&ctx.output, &view.snapshot());
            }
            Action::MoreUnits => {
                let count = view.change_count(1);
                ctx.output.kv("quantity", &count.to_string());
            }
            Action::FewerUnits => {
                let count = view.change_count(-1);
                ctx.output.kv("quantity", &count.to_string());
            }
            Action::WriteReview => {
                let draft = view.review();
                let author: String = Input::new()
                    .with_prompt("Your name")
                    .with_initial_text(draft.author)
                    .allow_empty(true)
                    .interact_text()?;
                let email: String = Input::new()
                    .with_prompt("Email")
                    .with_initial_text(draft.email)
                    .allow_empty(true)
                    .interact_text()?;
                let text: String = Input::new()
                    .with_prompt("Review")
                    .with_initial_text(draft.text)
                    .allow_empty(true)
                    .interact_text()?;
                let rate = prompt_rate()?;

                view.update_review(|draft| {
                    draft.author = author;
                    draft.email = email;
                    draft.text = text;
                    draft.rate = rate;
                });

                // A failed submission keeps the draft for the next attempt.
                if let Err(e) = publish(&view, ctx).await {
                    ctx.output.warn(&format!("{:#}", e));
                }
            }
            Action::Reload => {
                load_view(&view, ctx).await?;
                render_view(&ctx.output, &view.snapshot());
            }
            Action::Quit => return Ok(()),
        }
    }
}
