//! Review data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lowest rate a review can carry.
pub const RATE_MIN: u8 = 1;
/// Highest rate a review can carry.
pub const RATE_MAX: u8 = 5;
/// Rate a fresh draft starts with.
pub const DEFAULT_RATE: u8 = 5;

/// In-progress review form.
///
/// Values are sent as typed; the server is the only validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: u8,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            author: String::new(),
            email: String::new(),
            text: String::new(),
            rate: DEFAULT_RATE,
        }
    }
}

impl ReviewDraft {
    /// Back to an empty form with the default rate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Request body for publishing this draft.
    pub fn payload(&self) -> ReviewPayload {
        ReviewPayload {
            author: self.author.clone(),
            email: self.email.clone(),
            text: self.text.clone(),
            rate: self.rate,
        }
    }
}

/// Body of `POST /api/products/{id}/reviews/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPayload {
    pub author: String,
    pub email: String,
    pub text: String,
    pub rate: u8,
}

/// Response of the review endpoint: the full review list of the product.
///
/// Both a `{"data": [...]}` envelope and a bare list are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReviewsEnvelope {
    Wrapped { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl ReviewsEnvelope {
    pub fn into_reviews(self) -> Vec<Value> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(reviews) => reviews,
        }
    }
}

/// A published review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub text: String,
    pub rate: u8,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Review {
    /// Star bar such as `★★★★☆`; rates beyond the scale are clamped.
    pub fn stars(&self) -> String {
        let filled = self.rate.min(RATE_MAX) as usize;
        let empty = RATE_MAX as usize - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }

    /// Publication date as `YYYY-MM-DD HH:MM`.
    pub fn date_label(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
    }
}
