//! The product detail view.
//!
//! A [`ProductDetailView`] owns the page state and runs the two network
//! interactions of the page:
//!
//! 1. `load_product` fetches the product named by the page path and merges it
//!    into the state (started by [`ProductDetailView::mount`]).
//! 2. `submit_review` publishes the review draft and takes over the review
//!    list the server returns.
//!
//! Each interaction completes exactly once, on either its success or its
//! failure branch. Failures are logged and never returned to the caller.
//! State is only touched between suspension points, so a continuation never
//! observes a half-applied update.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde_json::Value;
use shop_observability::{StructuredLogger, ViewId};
use tokio::task::JoinHandle;

use crate::api::{product_endpoint, reviews_endpoint, ProductApi};
use crate::config::PdpConfig;
use crate::data::ReviewDraft;
use crate::error::PdpError;
use crate::notify::{Notifier, SilentNotifier};
use crate::route::ProductRef;
use crate::state::ViewState;

const COMPONENT: &str = "product-detail";

/// How an interaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The success branch ran.
    Applied,
    /// The failure branch ran.
    Failed,
    /// Nothing was sent (a guard stopped it).
    Skipped,
}

struct Inner {
    api: Arc<dyn ProductApi>,
    notifier: Arc<dyn Notifier>,
    logger: StructuredLogger,
    config: PdpConfig,
    current_path: String,
    state: Mutex<ViewState>,
    submitting: AtomicBool,
}

/// Handle to a product detail view. Clones share the same view.
#[derive(Clone)]
pub struct ProductDetailView {
    inner: Arc<Inner>,
}

/// Builder for [`ProductDetailView`].
pub struct ProductDetailViewBuilder {
    api: Arc<dyn ProductApi>,
    current_path: String,
    notifier: Arc<dyn Notifier>,
    logger: Option<StructuredLogger>,
    config: PdpConfig,
}

impl ProductDetailViewBuilder {
    /// Where shopper notices go. Defaults to [`SilentNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn config(mut self, config: PdpConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> ProductDetailView {
        let logger = self.logger.unwrap_or_else(|| {
            StructuredLogger::new(ViewId::generate())
                .with_component(COMPONENT)
                .with_route(self.current_path.clone())
        });

        ProductDetailView {
            inner: Arc::new(Inner {
                api: self.api,
                notifier: self.notifier,
                logger,
                config: self.config,
                current_path: self.current_path,
                state: Mutex::new(ViewState::default()),
                submitting: AtomicBool::new(false),
            }),
        }
    }
}

/// Clears the in-flight flag when a submission ends, however it ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ProductDetailView {
    /// Start building a view for the page at `current_path`.
    pub fn builder(
        api: Arc<dyn ProductApi>,
        current_path: impl Into<String>,
    ) -> ProductDetailViewBuilder {
        ProductDetailViewBuilder {
            api,
            current_path: current_path.into(),
            notifier: Arc::new(SilentNotifier),
            logger: None,
            config: PdpConfig::default(),
        }
    }

    /// View with default notifier, logger and config.
    pub fn new(api: Arc<dyn ProductApi>, current_path: impl Into<String>) -> Self {
        Self::builder(api, current_path).build()
    }

    /// Start loading the product in the background.
    ///
    /// Returns immediately; the handle resolves once the load has been
    /// applied. Must be called from within a tokio runtime.
    pub fn mount(&self) -> JoinHandle<Outcome> {
        let view = self.clone();
        tokio::spawn(async move { view.load_product().await })
    }

    /// Page path the view was created for.
    pub fn current_path(&self) -> &str {
        &self.inner.current_path
    }

    /// Product named by the page path.
    pub fn product_ref(&self) -> ProductRef {
        ProductRef::from_path(&self.inner.current_path)
    }

    pub fn config(&self) -> &PdpConfig {
        &self.inner.config
    }

    pub fn logger(&self) -> &StructuredLogger {
        &self.inner.logger
    }

    /// Fetch the product and merge it into the state.
    ///
    /// On failure the product is reset to an empty record.
    pub async fn load_product(&self) -> Outcome {
        let product = self.product_ref();
        let logger = &self.inner.logger;
        let started = Instant::now();

        logger
            .debug_builder("Loading product")
            .field("product", product.to_string())
            .field("url", product_endpoint(&product))
            .emit();

        match self.inner.api.fetch_product(&product).await {
            Ok(loaded) => {
                let images = loaded.images().len();
                self.lock_state().apply_loaded(loaded);
                logger
                    .info_builder("Product loaded")
                    .field("product", product.to_string())
                    .field_i64("images", images as i64)
                    .duration_ms("took_ms", started.elapsed())
                    .emit();
                Outcome::Applied
            }
            Err(source) => {
                self.lock_state().apply_load_failed();
                let err = PdpError::Load {
                    product: product.to_string(),
                    source,
                };
                let mut entry = logger
                    .warn_builder("Product load failed")
                    .field("product", product.to_string())
                    .field("error", err.to_string());
                if let Some(status) = err.status() {
                    entry = entry.field_i64("status", i64::from(status));
                }
                entry.emit();
                Outcome::Failed
            }
        }
    }

    /// Publish the review draft.
    ///
    /// On success the product's reviews are replaced by the server's list,
    /// the shopper is notified and the draft is cleared. On failure the draft
    /// is kept so the shopper can try again.
    pub async fn submit_review(&self) -> Outcome {
        let config = &self.inner.config;
        let logger = &self.inner.logger;

        let _guard = if config.guard_double_submit {
            if self.inner.submitting.swap(true, Ordering::AcqRel) {
                logger.debug("Review submission already in flight, skipping");
                return Outcome::Skipped;
            }
            Some(SubmitGuard(&self.inner.submitting))
        } else {
            None
        };

        let (product, payload) = {
            let state = self.lock_state();
            (state.product.id(), state.review.payload())
        };

        logger
            .debug_builder("Publishing review")
            .field("product", product.to_string())
            .field("url", reviews_endpoint(&product))
            .field_i64("rate", i64::from(payload.rate))
            .emit();

        match self.inner.api.post_review(&product, &payload).await {
            Ok(reviews) => {
                let total = reviews.len();
                self.lock_state().apply_review_published(reviews);
                self.inner
                    .notifier
                    .acknowledge(&config.review_published_message);
                logger
                    .info_builder("Review published")
                    .field("product", product.to_string())
                    .field_i64("reviews", total as i64)
                    .emit();
                Outcome::Applied
            }
            Err(source) => {
                let err = PdpError::Submit {
                    product: product.to_string(),
                    source,
                };
                let mut entry = logger
                    .warn_builder("Review submission failed")
                    .field("product", product.to_string())
                    .field("error", err.to_string());
                if let Some(status) = err.status() {
                    entry = entry.field_i64("status", i64::from(status));
                }
                entry.emit();

                if config.surface_submit_errors {
                    self.inner.notifier.report_error(&config.submit_error_message);
                }
                Outcome::Failed
            }
        }
    }

    /// Publish the review draft in the background.
    pub fn spawn_submit_review(&self) -> JoinHandle<Outcome> {
        let view = self.clone();
        tokio::spawn(async move { view.submit_review().await })
    }

    /// Adjust the quantity by `delta`, never going below 1.
    pub fn change_count(&self, delta: i64) -> u32 {
        self.lock_state().change_count(delta)
    }

    /// Select the photo at `index` and return the resulting selection.
    ///
    /// The index is taken as is unless `guard_photo_index` is set, in which
    /// case indices past the image list are ignored.
    pub fn set_active_photo(&self, index: usize) -> usize {
        let mut state = self.lock_state();
        if self.inner.config.guard_photo_index {
            if !state.select_existing_photo(index) {
                self.inner
                    .logger
                    .debug_builder("Ignoring photo index past the image list")
                    .field_i64("index", index as i64)
                    .field_i64("images", state.product.images().len() as i64)
                    .emit();
            }
        } else {
            state.set_active_photo(index);
        }
        state.active_photo
    }

    /// Edit the review draft.
    pub fn update_review(&self, edit: impl FnOnce(&mut ReviewDraft)) {
        edit(&mut self.lock_state().review);
    }

    /// Product tags; empty when none are loaded.
    pub fn tags(&self) -> Vec<Value> {
        self.lock_state().tags().to_vec()
    }

    pub fn count(&self) -> u32 {
        self.lock_state().count
    }

    pub fn active_photo(&self) -> usize {
        self.lock_state().active_photo
    }

    pub fn review(&self) -> ReviewDraft {
        self.lock_state().review.clone()
    }

    /// Copy of the whole state.
    pub fn snapshot(&self) -> ViewState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ProductDetailView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDetailView")
            .field("current_path", &self.inner.current_path)
            .field("view_id", self.inner.logger.view_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Product, ReviewPayload};
    use crate::notify::{Notice, RecordingNotifier};
    use async_trait::async_trait;
    use serde_json::json;
    use shop_data::FetchError;
    use shop_observability::{LogLevel, MemorySink};
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    /// Scripted [`ProductApi`]: answers are consumed in order.
    #[derive(Default)]
    struct FakeApi {
        products: Mutex<VecDeque<Result<Value, FetchError>>>,
        reviews: Mutex<VecDeque<Result<Vec<Value>, FetchError>>>,
        fetched: Mutex<Vec<ProductRef>>,
        posted: Mutex<Vec<(ProductRef, ReviewPayload)>>,
        /// When set, `post_review` waits for a permit before answering.
        hold_posts: Option<Arc<Notify>>,
    }

    impl FakeApi {
        fn product(self, answer: Result<Value, FetchError>) -> Self {
            self.products.lock().unwrap().push_back(answer);
            self
        }

        fn review(self, answer: Result<Vec<Value>, FetchError>) -> Self {
            self.reviews.lock().unwrap().push_back(answer);
            self
        }
    }

    #[async_trait]
    impl ProductApi for FakeApi {
        async fn fetch_product(&self, product: &ProductRef) -> Result<Product, FetchError> {
            self.fetched.lock().unwrap().push(product.clone());
            let answer = self
                .products
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Request("connection refused".into())))?;
            Ok(Product::from_value(answer).unwrap())
        }

        async fn post_review(
            &self,
            product: &ProductRef,
            review: &ReviewPayload,
        ) -> Result<Vec<Value>, FetchError> {
            self.posted
                .lock()
                .unwrap()
                .push((product.clone(), review.clone()));
            if let Some(gate) = &self.hold_posts {
                gate.notified().await;
            }
            self.reviews
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Timeout))
        }
    }

    struct Harness {
        view: ProductDetailView,
        api: Arc<FakeApi>,
        notifier: Arc<RecordingNotifier>,
        logs: Arc<MemorySink>,
    }

    fn harness(path: &str, api: FakeApi, config: PdpConfig) -> Harness {
        let api = Arc::new(api);
        let notifier = Arc::new(RecordingNotifier::default());
        let logs = Arc::new(MemorySink::default());
        let logger = StructuredLogger::new(ViewId::from_string("test"))
            .with_component(COMPONENT)
            .with_route(path)
            .with_min_level(LogLevel::Debug)
            .with_sink(logs.clone());
        let view = ProductDetailView::builder(api.clone(), path)
            .notifier(notifier.clone())
            .logger(logger)
            .config(config)
            .build();
        Harness {
            view,
            api,
            notifier,
            logs,
        }
    }

    fn fill_draft(view: &ProductDetailView) {
        view.update_review(|draft| {
            draft.author = "Ann".into();
            draft.email = "ann@example.com".into();
            draft.text = "Solid lamp".into();
            draft.rate = 4;
        });
    }

    // === Derived state ===

    #[test]
    fn test_initial_state() {
        let h = harness("/products/1/", FakeApi::default(), PdpConfig::default());
        let state = h.view.snapshot();
        assert!(state.product.is_empty());
        assert_eq!(state.count, 1);
        assert_eq!(state.active_photo, 0);
        assert!(h.view.tags().is_empty());
        assert_eq!(h.view.review(), ReviewDraft::default());
    }

    #[test]
    fn test_change_count_clamps() {
        let h = harness("/products/1/", FakeApi::default(), PdpConfig::default());
        assert_eq!(h.view.change_count(2), 3);
        assert_eq!(h.view.change_count(-1), 2);
        assert_eq!(h.view.change_count(-10), 1);
        assert_eq!(h.view.count(), 1);
    }

    #[test]
    fn test_set_active_photo_unchecked_by_default() {
        let h = harness("/products/1/", FakeApi::default(), PdpConfig::default());
        assert_eq!(h.view.set_active_photo(3), 3);
        assert_eq!(h.view.active_photo(), 3);
    }

    #[tokio::test]
    async fn test_set_active_photo_guarded() {
        let api = FakeApi::default().product(Ok(json!({"id": 1, "images": ["a.png", "b.png"]})));
        let config = PdpConfig {
            guard_photo_index: true,
            ..Default::default()
        };
        let h = harness("/products/1/", api, config);
        h.view.load_product().await;

        assert_eq!(h.view.set_active_photo(1), 1);
        assert_eq!(h.view.set_active_photo(3), 1);
    }

    // === Loading ===

    #[tokio::test]
    async fn test_load_requests_id_from_path() {
        let api = FakeApi::default().product(Ok(json!({"id": 42, "images": []})));
        let h = harness("/products/42/", api, PdpConfig::default());

        assert_eq!(h.view.load_product().await, Outcome::Applied);
        assert_eq!(*h.api.fetched.lock().unwrap(), vec![ProductRef::Id(42)]);
    }

    #[tokio::test]
    async fn test_load_without_trailing_slash() {
        let api = FakeApi::default().product(Ok(json!({"id": 42, "images": []})));
        let h = harness("/products/42", api, PdpConfig::default());

        h.view.load_product().await;
        assert_eq!(*h.api.fetched.lock().unwrap(), vec![ProductRef::Id(42)]);
    }

    #[tokio::test]
    async fn test_load_on_foreign_path_still_requests() {
        let h = harness("/catalog/", FakeApi::default(), PdpConfig::default());

        assert_eq!(h.view.load_product().await, Outcome::Failed);
        assert_eq!(*h.api.fetched.lock().unwrap(), vec![ProductRef::Missing]);
    }

    #[tokio::test]
    async fn test_load_success_merges_and_resets_photo() {
        let response = json!({"id": 1, "tags": ["a"], "images": ["x.png", "y.png"], "reviews": []});
        let api = FakeApi::default().product(Ok(response.clone()));
        let h = harness("/products/1/", api, PdpConfig::default());
        h.view.set_active_photo(5);

        h.view.load_product().await;

        let state = h.view.snapshot();
        assert_eq!(state.product, Product::from_value(response).unwrap());
        assert_eq!(state.active_photo, 0);
        assert_eq!(h.view.tags(), vec![json!("a")]);
    }

    #[tokio::test]
    async fn test_load_merges_over_previous_fields() {
        let api = FakeApi::default()
            .product(Ok(json!({"id": 1, "title": "Lamp", "count": 4, "images": []})))
            .product(Ok(json!({"id": 1, "title": "Desk lamp", "images": []})));
        let h = harness("/products/1/", api, PdpConfig::default());

        h.view.load_product().await;
        h.view.load_product().await;

        let state = h.view.snapshot();
        assert_eq!(state.product.title(), Some("Desk lamp"));
        assert_eq!(state.product.stock(), Some(4));
    }

    #[tokio::test]
    async fn test_load_with_empty_images_keeps_photo() {
        let api = FakeApi::default().product(Ok(json!({"id": 1, "images": []})));
        let h = harness("/products/1/", api, PdpConfig::default());
        h.view.set_active_photo(2);

        h.view.load_product().await;
        assert_eq!(h.view.active_photo(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_resets_product() {
        let api = FakeApi::default()
            .product(Ok(json!({"id": 1, "tags": ["a"], "images": ["x.png"]})))
            .product(Err(FetchError::Http {
                status: 500,
                message: "boom".into(),
            }));
        let h = harness("/products/1/", api, PdpConfig::default());

        h.view.load_product().await;
        assert!(!h.view.snapshot().product.is_empty());

        assert_eq!(h.view.load_product().await, Outcome::Failed);
        assert_eq!(h.view.snapshot().product, Product::new());
        assert!(h.view.tags().is_empty());

        let warnings = h.logs.at_least(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Product load failed");
        assert_eq!(warnings[0].field("status"), Some(&json!(500)));
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_mount_loads_in_background() {
        let api = FakeApi::default().product(Ok(json!({"id": 9, "images": ["x.png"]})));
        let h = harness("/products/9/", api, PdpConfig::default());

        let handle = h.view.mount();
        assert_eq!(handle.await.unwrap(), Outcome::Applied);
        assert_eq!(h.view.snapshot().product.id(), ProductRef::Id(9));
    }

    // === Reviews ===

    #[tokio::test]
    async fn test_submit_success_replaces_reviews_and_resets_draft() {
        let published = vec![json!({"author": "A", "rate": 5, "text": "ok"})];
        let api = FakeApi::default()
            .product(Ok(json!({"id": 7, "images": [], "reviews": [{"author": "Old", "rate": 1}]})))
            .review(Ok(published.clone()));
        let h = harness("/products/7/", api, PdpConfig::default());
        h.view.load_product().await;
        fill_draft(&h.view);

        assert_eq!(h.view.submit_review().await, Outcome::Applied);

        let state = h.view.snapshot();
        assert_eq!(state.product.reviews(), published.as_slice());
        assert_eq!(state.review, ReviewDraft::default());
        assert_eq!(
            h.notifier.notices(),
            vec![Notice::Acknowledged("Review published".to_string())]
        );

        let posted = h.api.posted.lock().unwrap();
        assert_eq!(posted[0].0, ProductRef::Id(7));
        assert_eq!(posted[0].1.author, "Ann");
        assert_eq!(posted[0].1.rate, 4);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let api = FakeApi::default()
            .product(Ok(json!({"id": 7, "images": []})))
            .review(Err(FetchError::Http {
                status: 400,
                message: "bad email".into(),
            }));
        let h = harness("/products/7/", api, PdpConfig::default());
        h.view.load_product().await;
        fill_draft(&h.view);
        let before = h.view.review();

        assert_eq!(h.view.submit_review().await, Outcome::Failed);
        assert_eq!(h.view.review(), before);
        assert!(h.view.snapshot().product.reviews().is_empty());
        assert!(h.notifier.notices().is_empty());
        assert_eq!(h.logs.at_least(LogLevel::Warn)[0].message, "Review submission failed");
    }

    #[tokio::test]
    async fn test_submit_failure_surfaced_when_configured() {
        let api = FakeApi::default()
            .product(Ok(json!({"id": 7, "images": []})))
            .review(Err(FetchError::Timeout));
        let config = PdpConfig {
            surface_submit_errors: true,
            ..Default::default()
        };
        let h = harness("/products/7/", api, config);
        h.view.load_product().await;

        h.view.submit_review().await;
        assert_eq!(
            h.notifier.notices(),
            vec![Notice::Error("Could not publish the review".to_string())]
        );
    }

    #[tokio::test]
    async fn test_submit_without_loaded_product_uses_missing_id() {
        let h = harness("/products/7/", FakeApi::default(), PdpConfig::default());

        assert_eq!(h.view.submit_review().await, Outcome::Failed);
        assert_eq!(h.api.posted.lock().unwrap()[0].0, ProductRef::Missing);
    }

    #[tokio::test]
    async fn test_repeated_submissions_are_independent() {
        let api = FakeApi::default()
            .product(Ok(json!({"id": 7, "images": []})))
            .review(Ok(vec![json!({"author": "A", "rate": 5})]))
            .review(Ok(vec![json!({"author": "A", "rate": 5}), json!({"author": "B", "rate": 4})]));
        let h = harness("/products/7/", api, PdpConfig::default());
        h.view.load_product().await;

        let (first, second) = tokio::join!(h.view.submit_review(), h.view.submit_review());
        assert_eq!((first, second), (Outcome::Applied, Outcome::Applied));
        assert_eq!(h.api.posted.lock().unwrap().len(), 2);
        assert_eq!(h.view.snapshot().product.reviews().len(), 2);
    }

    #[tokio::test]
    async fn test_double_submit_guard_skips_in_flight() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi {
            hold_posts: Some(gate.clone()),
            ..Default::default()
        }
        .product(Ok(json!({"id": 7, "images": []})))
        .review(Ok(vec![json!({"author": "A", "rate": 5})]));
        let config = PdpConfig {
            guard_double_submit: true,
            ..Default::default()
        };
        let h = harness("/products/7/", api, config);
        h.view.load_product().await;

        let first = h.view.spawn_submit_review();
        while h.api.posted.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        assert_eq!(h.view.submit_review().await, Outcome::Skipped);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), Outcome::Applied);
        assert_eq!(h.api.posted.lock().unwrap().len(), 1);

        // The flag is released once the first submission ends.
        gate.notify_one();
        assert_eq!(h.view.submit_review().await, Outcome::Failed);
    }
}
