//! `customers/create` and `customers/update` payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::types::{AddressId, CustomerId, OrderId, lenient_decimal};

/// A customer as delivered by the customer webhook.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: CustomerId,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accepts_marketing: bool,
    /// Missing or `null` stays `None` and is stored as SQL `NULL`, not as a
    /// zero instant.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub orders_count: i64,
    /// Account state: `disabled`, `invited`, `enabled` or `declined`.
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    /// Lifetime spend as text. See [`Self::total_spent_amount`].
    #[serde(deserialize_with = "null_as_default")]
    pub total_spent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_order_id: OrderId,
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(deserialize_with = "null_as_default")]
    pub verified_email: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub multipass_identifier: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tax_exempt: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_order_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<AddressPayload>,
}

impl CustomerPayload {
    /// Lifetime spend as a decimal; zero if the text is not a number.
    #[must_use]
    pub fn total_spent_amount(&self) -> Decimal {
        lenient_decimal(&self.total_spent)
    }
}

/// A postal address embedded in a customer payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub id: AddressId,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_id: CustomerId,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(rename = "address1", deserialize_with = "null_as_default")]
    pub address_one: String,
    #[serde(rename = "address2", deserialize_with = "null_as_default")]
    pub address_two: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub province_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country_name: String,
    /// Whether this is the customer's default address.
    #[serde(rename = "default", deserialize_with = "null_as_default")]
    pub is_default: bool,
}
