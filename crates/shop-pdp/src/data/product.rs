//! Product data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data::Review;
use crate::route::ProductRef;

/// Product record as sent by the storefront API.
///
/// The record is kept as a loose bag of fields: whatever the server sends is
/// preserved, and only a handful of fields are ever read structurally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

/// Tags of an optional product; empty when the product or its tags are absent.
pub fn tags_of(product: Option<&Product>) -> &[Value] {
    match product.and_then(|p| p.0.get("tags")) {
        Some(Value::Array(tags)) => tags.as_slice(),
        _ => &[],
    }
}

impl Product {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from a JSON value; `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn id(&self) -> ProductRef {
        ProductRef::from_value(self.0.get("id"))
    }

    /// Tags, or an empty slice when the field is absent or not a list.
    pub fn tags(&self) -> &[Value] {
        tags_of(Some(self))
    }

    pub fn images(&self) -> &[Value] {
        self.array("images")
    }

    pub fn reviews(&self) -> &[Value] {
        self.array("reviews")
    }

    /// Shallow merge: fields of `other` replace same-named fields here,
    /// everything else is kept.
    pub fn merge(&mut self, other: Product) {
        self.0.extend(other.0);
    }

    /// Replace the review list wholesale.
    pub fn set_reviews(&mut self, reviews: Vec<Value>) {
        self.0.insert("reviews".to_string(), Value::Array(reviews));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    pub fn full_description(&self) -> Option<&str> {
        self.0.get("fullDescription").and_then(Value::as_str)
    }

    /// Price as a number. Decimal prices arrive as strings.
    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(number_like)
    }

    pub fn rating(&self) -> Option<f64> {
        self.0.get("rating").and_then(number_like)
    }

    /// Units in stock.
    pub fn stock(&self) -> Option<u64> {
        self.0.get("count").and_then(Value::as_u64)
    }

    pub fn free_delivery(&self) -> bool {
        self.0
            .get("freeDelivery")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Tag names, skipping entries that are neither strings nor `{name}` objects.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags()
            .iter()
            .filter_map(|tag| match tag {
                Value::String(name) => Some(name.clone()),
                Value::Object(fields) => fields
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect()
    }

    /// Decoded images; entries that don't decode are skipped.
    pub fn product_images(&self) -> Vec<ProductImage> {
        self.images().iter().filter_map(ProductImage::from_value).collect()
    }

    /// Decoded reviews; entries that don't decode are skipped.
    pub fn product_reviews(&self) -> Vec<Review> {
        self.reviews()
            .iter()
            .filter_map(|r| serde_json::from_value(r.clone()).ok())
            .collect()
    }

    pub fn specifications(&self) -> Vec<Specification> {
        self.array("specifications")
            .iter()
            .filter_map(|s| serde_json::from_value(s.clone()).ok())
            .collect()
    }

    fn array(&self, key: &str) -> &[Value] {
        match self.0.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl ProductImage {
    /// Accepts `{src, alt}` objects and bare URL strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(src) => Some(Self {
                src: src.clone(),
                alt: String::new(),
            }),
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

/// Product specification (name/value pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}
