//! Data models for the product detail page.

mod product;
mod review;

pub use product::*;
pub use review::*;
