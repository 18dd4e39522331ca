//! `products/create` and `products/update` payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::types::{ImageId, ProductId, VariantId, lenient_decimal};

/// A product as delivered by the product webhook.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: ProductId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Description as HTML.
    #[serde(deserialize_with = "null_as_default")]
    pub body_html: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vendor: String,
    /// Merchant-defined category label.
    #[serde(deserialize_with = "null_as_default")]
    pub product_type: String,
    /// URL-safe slug.
    #[serde(deserialize_with = "null_as_default")]
    pub handle: String,
    /// Comma-separated tag string, stored as-is.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: String,
    /// Missing or `null` stays `None` and is stored as SQL `NULL`, not as a
    /// zero instant.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// `None` for unpublished products.
    pub published_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub variants: Vec<VariantPayload>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<ImagePayload>,
}

impl ProductPayload {
    /// Number of child rows (variants and images) carried by the payload.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.variants.len() + self.images.len()
    }
}

/// A product variant embedded in a product payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: VariantId,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: ProductId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Price as text, e.g. `"19.99"`. See [`Self::price_amount`].
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: i32,
    /// `deny` or `continue`.
    #[serde(deserialize_with = "null_as_default")]
    pub inventory_policy: String,
    /// Compare-at price as text; usually `null` when no sale is running.
    #[serde(deserialize_with = "null_as_default")]
    pub compare_at_price: String,
    #[serde(deserialize_with = "null_as_default")]
    pub taxable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub barcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub weight_unit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub inventory_quantity: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub requires_shipping: bool,
    /// Missing or `null` stays `None` and is stored as SQL `NULL`, not as a
    /// zero instant.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl VariantPayload {
    /// Price as a decimal; zero if the text is not a number.
    #[must_use]
    pub fn price_amount(&self) -> Decimal {
        lenient_decimal(&self.price)
    }

    /// Compare-at price as a decimal; zero if unset or not a number.
    #[must_use]
    pub fn compare_at_price_amount(&self) -> Decimal {
        lenient_decimal(&self.compare_at_price)
    }
}

/// A product image embedded in a product payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: ImageId,
    #[serde(deserialize_with = "null_as_default")]
    pub product_id: ProductId,
    #[serde(deserialize_with = "null_as_default")]
    pub position: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: i32,
    /// Variants this image is shown for.
    #[serde(deserialize_with = "null_as_default")]
    pub variant_ids: Vec<VariantId>,
    /// Missing or `null` stays `None` and is stored as SQL `NULL`, not as a
    /// zero instant.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ImagePayload {
    /// Variant IDs as raw integers, for binding to a `BIGINT[]` column.
    #[must_use]
    pub fn variant_ids_i64(&self) -> Vec<i64> {
        self.variant_ids.iter().map(VariantId::as_i64).collect()
    }
}
