//! Local state of a product detail view.

use serde::Serialize;
use serde_json::Value;

use crate::data::{Product, ProductImage, ReviewDraft};

/// Everything the page renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    /// Product record, empty until a load succeeds.
    pub product: Product,
    /// Index into `product.images` of the photo on display.
    pub active_photo: usize,
    /// Quantity selector, never below 1.
    pub count: u32,
    /// Review form.
    pub review: ReviewDraft,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            product: Product::new(),
            active_photo: 0,
            count: 1,
            review: ReviewDraft::default(),
        }
    }
}

impl ViewState {
    pub fn tags(&self) -> &[Value] {
        self.product.tags()
    }

    /// Add `delta` to the count, clamping at 1.
    pub fn change_count(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.count).saturating_add(delta);
        self.count = next.clamp(1, i64::from(u32::MAX)) as u32;
        self.count
    }

    /// Select a photo. The index is not checked against the image list.
    pub fn set_active_photo(&mut self, index: usize) {
        self.active_photo = index;
    }

    /// Select a photo only if it exists; returns whether it was selected.
    pub fn select_existing_photo(&mut self, index: usize) -> bool {
        if index < self.product.images().len() {
            self.active_photo = index;
            true
        } else {
            false
        }
    }

    /// Merge a loaded record into the product.
    ///
    /// The photo selection goes back to the first image when the response
    /// carries any images, and is left alone otherwise.
    pub fn apply_loaded(&mut self, loaded: Product) {
        let has_images = !loaded.images().is_empty();
        self.product.merge(loaded);
        if has_images {
            self.active_photo = 0;
        }
    }

    /// Drop whatever was loaded before.
    pub fn apply_load_failed(&mut self) {
        self.product.clear();
    }

    /// Store the server's review list and clear the form.
    pub fn apply_review_published(&mut self, reviews: Vec<Value>) {
        self.product.set_reviews(reviews);
        self.review.reset();
    }

    /// The image on display, if the index points at one.
    pub fn active_image(&self) -> Option<ProductImage> {
        self.product
            .images()
            .get(self.active_photo)
            .and_then(ProductImage::from_value)
    }
}
