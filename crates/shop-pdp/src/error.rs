//! Product detail page error types.

use shop_data::FetchError;
use thiserror::Error;

/// Errors raised by the product detail view.
///
/// These never leave the view; they are turned into diagnostics.
#[derive(Error, Debug)]
pub enum PdpError {
    /// Fetching the product failed.
    #[error("Failed to load product {product}: {source}")]
    Load {
        product: String,
        #[source]
        source: FetchError,
    },

    /// Publishing a review failed.
    #[error("Failed to publish review for product {product}: {source}")]
    Submit {
        product: String,
        #[source]
        source: FetchError,
    },
}

impl PdpError {
    /// HTTP status of the underlying failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            PdpError::Load { source, .. } | PdpError::Submit { source, .. } => source.status(),
        }
    }
}
