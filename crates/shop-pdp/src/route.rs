//! Product identifiers taken from page paths and product records.

use std::fmt;

use serde_json::Value;

/// Path prefix of product detail pages.
pub const PRODUCT_PATH_PREFIX: &str = "/products/";

/// The product a request refers to.
///
/// Requests are issued for every variant. Only `Id` can name a real
/// product, the others produce a URL the server answers with an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductRef {
    /// Numeric product id.
    Id(u64),
    /// The path had the product prefix but no whole number after it.
    Unparsable(String),
    /// The path is not a product page, or the record has no id.
    Missing,
}

impl ProductRef {
    /// Derive the product from a page path like `/products/42/`.
    ///
    /// Query strings and fragments are ignored. One trailing `/` is
    /// stripped before parsing. An empty segment reads as `0`, and a whole
    /// number written with a fraction or exponent (`4.0`, `1e2`) reads as
    /// that number.
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        let Some(rest) = path.strip_prefix(PRODUCT_PATH_PREFIX) else {
            return Self::Missing;
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        parse_segment(rest)
    }

    /// Read the `id` field of a product record.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(id) => Self::Id(id),
                None => Self::Unparsable(n.to_string()),
            },
            Some(Value::String(s)) => match s.parse::<u64>() {
                Ok(id) => Self::Id(id),
                Err(_) => Self::Unparsable(s.clone()),
            },
            _ => Self::Missing,
        }
    }

    /// The numeric id, if there is one.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            _ => None,
        }
    }
}

fn parse_segment(segment: &str) -> ProductRef {
    let text = segment.trim();
    if text.is_empty() {
        return ProductRef::Id(0);
    }
    if let Ok(id) = text.parse::<u64>() {
        return ProductRef::Id(id);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            ProductRef::Id(n as u64)
        }
        _ => ProductRef::Unparsable(segment.to_string()),
    }
}

/// Renders the URL path segment.
///
/// Non-numeric ids become `NaN` and absent ones `null`, so a malformed page
/// path never injects extra segments into the API URL.
impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Unparsable(_) => f.write_str("NaN"),
            Self::Missing => f.write_str("null"),
        }
    }
}
