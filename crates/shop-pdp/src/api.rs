//! Storefront REST endpoints used by the product detail page.

use async_trait::async_trait;
use serde_json::Value;
use shop_data::{FetchClient, FetchError};

use crate::data::{Product, ReviewPayload, ReviewsEnvelope};
use crate::route::ProductRef;

/// `GET` endpoint of a single product.
pub fn product_endpoint(product: &ProductRef) -> String {
    format!("/api/products/{}/", product)
}

/// `POST` endpoint for publishing a review of a product.
pub fn reviews_endpoint(product: &ProductRef) -> String {
    format!("/api/products/{}/reviews/", product)
}

/// The two calls the product detail page makes.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetch one product record.
    async fn fetch_product(&self, product: &ProductRef) -> Result<Product, FetchError>;

    /// Publish a review and return the product's full review list.
    async fn post_review(
        &self,
        product: &ProductRef,
        review: &ReviewPayload,
    ) -> Result<Vec<Value>, FetchError>;
}

/// [`ProductApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: FetchClient,
}

impl HttpProductApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn fetch_product(&self, product: &ProductRef) -> Result<Product, FetchError> {
        let body: Value = self
            .client
            .get(product_endpoint(product))
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()?;

        decode_product(body)
    }

    async fn post_review(
        &self,
        product: &ProductRef,
        review: &ReviewPayload,
    ) -> Result<Vec<Value>, FetchError> {
        let envelope: ReviewsEnvelope = self
            .client
            .post(reviews_endpoint(product))
            .header("Accept", "application/json")
            .json(review)?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        Ok(envelope.into_reviews())
    }
}

/// A product response must be an object with an `images` list.
fn decode_product(body: Value) -> Result<Product, FetchError> {
    let product = Product::from_value(body)
        .ok_or_else(|| FetchError::Parse("product response is not an object".to_string()))?;

    if !matches!(product.get("images"), Some(Value::Array(_))) {
        return Err(FetchError::Parse(
            "product response has no images list".to_string(),
        ));
    }

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shop_data::{RequestBuilder, Response, Transport};
    use std::sync::{Arc, Mutex};

    /// Replies with a canned response and keeps every request.
    struct CannedTransport {
        status: u16,
        body: Value,
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Response::from_json(self.status, &self.body)
        }
    }

    fn api(status: u16, body: Value) -> (HttpProductApi, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        });
        let client = FetchClient::with_transport(transport.clone()).with_base_url("http://shop.test");
        (HttpProductApi::new(client), transport)
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(product_endpoint(&ProductRef::Id(42)), "/api/products/42/");
        assert_eq!(product_endpoint(&ProductRef::Missing), "/api/products/null/");
        assert_eq!(
            reviews_endpoint(&ProductRef::Id(42)),
            "/api/products/42/reviews/"
        );
    }

    #[tokio::test]
    async fn test_fetch_product_requests_numeric_id() {
        let (api, transport) = api(200, json!({"id": 42, "images": []}));
        let product = api.fetch_product(&ProductRef::Id(42)).await.unwrap();

        assert_eq!(product.id(), ProductRef::Id(42));
        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://shop.test/api/products/42/");
        assert_eq!(seen[0].method(), shop_data::Method::Get);
    }

    #[tokio::test]
    async fn test_fetch_product_without_id_still_requests() {
        let (api, transport) = api(404, json!({"detail": "Not found."}));
        let err = api.fetch_product(&ProductRef::Missing).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(
            transport.seen.lock().unwrap()[0].url(),
            "http://shop.test/api/products/null/"
        );
    }

    #[tokio::test]
    async fn test_fetch_product_rejects_missing_images() {
        let (api, _) = api(200, json!({"id": 1}));
        let err = api.fetch_product(&ProductRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_product_rejects_non_object() {
        let (api, _) = api(200, json!([1, 2, 3]));
        let err = api.fetch_product(&ProductRef::Id(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_post_review_sends_payload_and_unwraps_data() {
        let (api, transport) = api(201, json!({"data": [{"author": "A", "rate": 5}]}));
        let payload = ReviewPayload {
            author: "A".into(),
            email: "a@example.com".into(),
            text: "Nice".into(),
            rate: 5,
        };

        let reviews = api.post_review(&ProductRef::Id(3), &payload).await.unwrap();
        assert_eq!(reviews, vec![json!({"author": "A", "rate": 5})]);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].url(), "http://shop.test/api/products/3/reviews/");
        assert_eq!(seen[0].method(), shop_data::Method::Post);
        let sent: ReviewPayload = seen[0].json_body().unwrap();
        assert_eq!(sent, payload);
    }

    #[tokio::test]
    async fn test_post_review_server_error() {
        let (api, _) = api(400, json!({"email": ["Enter a valid email address."]}));
        let payload = ReviewPayload {
            author: "A".into(),
            email: "nope".into(),
            text: "x".into(),
            rate: 5,
        };
        let err = api.post_review(&ProductRef::Id(3), &payload).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
