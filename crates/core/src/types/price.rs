//! Decimal handling for amounts Shopify delivers as text.
//!
//! Webhook payloads encode money as JSON strings (`"price": "19.99"`,
//! `"total_spent": "0.00"`). They are stored as `NUMERIC`, so the text has
//! to be parsed before the upsert.
//!
//! # Known hazard
//!
//! The parse is deliberately lenient: anything that is not a decimal number
//! (an empty string, `null`, `"N/A"`, `"19,99"`) is stored as **zero** and the
//! request still succeeds. A malformed price therefore shows up as a free
//! item rather than as a failed delivery. Callers that care should compare
//! the raw payload text against the stored value.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a text-encoded amount, falling back to zero when it is not a number.
///
/// Accepts plain decimals (`"19.99"`, `"-5"`) and scientific notation
/// (`"1.5e2"`).
#[must_use]
pub fn lenient_decimal(raw: &str) -> Decimal {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO)
}
