//! Product detail page view.
//!
//! Loads one product from the storefront API, tracks which photo is on
//! display and how many units the shopper wants, and publishes customer
//! reviews.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shop_data::FetchClient;
//! use shop_pdp::{HttpProductApi, ProductDetailView};
//!
//! let client = FetchClient::new().with_base_url("http://127.0.0.1:8000");
//! let view = ProductDetailView::new(Arc::new(HttpProductApi::new(client)), "/products/42/");
//!
//! view.mount().await?;
//! view.change_count(1);
//! view.set_active_photo(1);
//! view.update_review(|draft| {
//!     draft.author = "Ann".into();
//!     draft.email = "ann@example.com".into();
//!     draft.text = "Does what it says".into();
//! });
//! view.submit_review().await;
//! ```

mod api;
mod config;
mod data;
mod error;
mod notify;
mod route;
mod state;
mod view;

pub use api::*;
pub use config::*;
pub use data::*;
pub use error::*;
pub use notify::*;
pub use route::*;
pub use state::*;
pub use view::*;
