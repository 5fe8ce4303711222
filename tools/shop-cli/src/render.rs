//! Terminal rendering of a product detail view.

use console::style;
use shop_pdp::{Review, ViewState};

use crate::output::Output;

/// Print the whole page.
pub fn render_view(output: &Output, state: &ViewState) {
    let product = &state.product;

    if product.is_empty() {
        output.warn("No product data to show");
        return;
    }

    output.header(product.title().unwrap_or("Untitled product"));
    output.kv("price", &format_price(product.price()));
    if let Some(rating) = product.rating() {
        output.kv("rating", &format!("{:.1}", rating));
    }
    if let Some(stock) = product.stock() {
        output.kv("in stock", &stock.to_string());
    }
    if product.free_delivery() {
        output.kv("delivery", "free");
    }
    output.kv("quantity", &state.count.to_string());

    let tags = product.tag_names();
    if !tags.is_empty() {
        output.kv("tags", &tags.join(", "));
    }

    if let Some(description) = product.full_description().or(product.description()) {
        output.line("");
        output.line(description);
    }

    render_gallery(output, state);

    let specifications = product.specifications();
    if !specifications.is_empty() {
        output.header("Specifications");
        for spec in &specifications {
            output.kv(&spec.name, &spec.value);
        }
    }

    render_reviews(output, &product.product_reviews());
}

/// Print the photo strip with the active photo marked.
pub fn render_gallery(output: &Output, state: &ViewState) {
    let count = state.product.images().len();
    if count == 0 {
        return;
    }

    output.header("Photos");
    output.line(&format!("  {}", gallery_strip(count, state.active_photo)));
    match state.active_image() {
        Some(image) if image.alt.is_empty() => output.kv("showing", &image.src),
        Some(image) => output.kv("showing", &format!("{} ({})", image.src, image.alt)),
        None => output.kv("showing", "nothing (no photo at this position)"),
    }
}

/// Print published reviews, newest last.
pub fn render_reviews(output: &Output, reviews: &[Review]) {
    output.header(&format!("Reviews ({})", reviews.len()));
    if reviews.is_empty() {
        output.line("  No reviews yet.");
        return;
    }
    for review in reviews {
        output.line(&format!("  {}", style(review_heading(review)).bold()));
        if !review.text.is_empty() {
            output.line(&format!("    {}", review.text));
        }
    }
}

/// `1 [2] 3` with the active position in brackets.
pub fn gallery_strip(count: usize, active: usize) -> String {
    (0..count)
        .map(|i| {
            if i == active {
                format!("[{}]", i + 1)
            } else {
                (i + 1).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) => format!("${:.2}", price),
        None => "n/a".to_string(),
    }
}

fn review_heading(review: &Review) -> String {
    match review.date_label() {
        Some(date) => format!("{} {} · {}", review.stars(), review.author, date),
        None => format!("{} {}", review.stars(), review.author),
    }
}
