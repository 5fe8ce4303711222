//! Show a product page.

use anyhow::Result;

use super::{load_view, ShowArgs};
use crate::context::Context;
use crate::render::render_view;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let view = ctx.product_view(&args.path)?;
    load_view(&view, ctx).await?;

    if let Some(photo) = args.photo {
        view.set_active_photo(photo.saturating_sub(1));
    }

    let state = view.snapshot();
    if ctx.output.is_json() {
        ctx.output.json(&state);
    } else {
        render_view(&ctx.output, &state);
    }

    Ok(())
}
