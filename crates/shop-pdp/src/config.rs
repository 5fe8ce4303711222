//! Product detail page configuration.

use serde::{Deserialize, Serialize};

/// Behaviour switches and texts of the product detail view.
///
/// The defaults reproduce the storefront page as shipped: photo indices are
/// not checked, repeated submissions are not blocked and failed
/// submissions are only logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdpConfig {
    /// Origin the API paths are resolved against.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Shown after a review is published.
    #[serde(default = "default_published_message")]
    pub review_published_message: String,

    /// Shown after a failed submission when `surface_submit_errors` is on.
    #[serde(default = "default_submit_error_message")]
    pub submit_error_message: String,

    /// Ignore photo selections past the end of the image list.
    #[serde(default)]
    pub guard_photo_index: bool,

    /// Skip a submission while another one is in flight.
    #[serde(default)]
    pub guard_double_submit: bool,

    /// Tell the shopper when a submission fails.
    #[serde(default)]
    pub surface_submit_errors: bool,
}

fn default_api_base() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_published_message() -> String {
    "Review published".to_string()
}

fn default_submit_error_message() -> String {
    "Could not publish the review".to_string()
}

impl Default for PdpConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            review_published_message: default_published_message(),
            submit_error_message: default_submit_error_message(),
            guard_photo_index: false,
            guard_double_submit: false,
            surface_submit_errors: false,
        }
    }
}
