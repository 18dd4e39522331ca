//! Shopify webhook payloads.
//!
//! Shopify posts the full resource as JSON for the `products/create`,
//! `products/update`, `customers/create` and `customers/update` topics.
//! Only the fields that are persisted are modelled here; everything else in
//! the body is ignored.
//!
//! # Decoding rules
//!
//! - No field is required. A missing field decodes to its zero value
//!   (`""`, `0`, `false`, an empty list).
//! - `null` is treated the same as a missing field. Shopify sends `null` for
//!   unset SKUs, barcodes, compare-at prices and so on.
//! - Timestamps that are missing or `null` decode to `None`.
//! - A field holding the wrong JSON type (a string where a number is
//!   expected) fails the whole decode.
//! - The body and every element of a child collection must be a JSON
//!   object. serde would otherwise fill a struct from an array by position.

mod customer;
mod product;

pub use customer::{AddressPayload, CustomerPayload};
pub use product::{ImagePayload, ProductPayload, VariantPayload};

use serde::de::{self, DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// The request body was not a well-formed payload of the expected shape.
#[derive(Debug, Error)]
#[error("invalid webhook payload: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// A top-level webhook payload.
pub trait WebhookPayload: DeserializeOwned {
    /// Keys whose values are lists of child objects.
    const CHILD_COLLECTIONS: &'static [&'static str];
}

impl WebhookPayload for ProductPayload {
    const CHILD_COLLECTIONS: &'static [&'static str] = &["variants", "images"];
}

impl WebhookPayload for CustomerPayload {
    const CHILD_COLLECTIONS: &'static [&'static str] = &["addresses"];
}

/// Decode a webhook body into a payload type.
///
/// # Errors
///
/// Returns `DecodeError` if the body is not valid JSON, is not an object,
/// holds a non-object child element, or a field has the wrong type.
pub fn decode<T: WebhookPayload>(body: &[u8]) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(body)?;
    let object = value.as_object().ok_or_else(|| not_an_object(&value))?;

    for key in T::CHILD_COLLECTIONS {
        let stray = object
            .get(*key)
            .and_then(Value::as_array)
            .and_then(|children| children.iter().find(|c| !c.is_object()));
        if let Some(child) = stray {
            return Err(not_an_object(child).into());
        }
    }

    Ok(serde_json::from_value(value)?)
}

fn not_an_object(value: &Value) -> serde_json::Error {
    let unexpected = match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    de::Error::invalid_type(unexpected, &"a JSON object")
}

/// Deserialize a field, mapping JSON `null` to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
