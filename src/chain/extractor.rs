//! Last-traded price extraction
//!
//! Walks expirations, then strikes, then option records in the order the
//! provider sent them and returns the first last-traded price found. Callers
//! request a single strike, so the first priced record is the quote of
//! interest. Any level that is missing or has an unexpected shape is skipped.

use super::OptionChainResponse;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Record field holding the last-traded price
pub const LAST_PRICE_FIELD: &str = "last";

/// First last-traded price in provider order, or `None` if no record carries one
pub fn extract_last_price(chain: &OptionChainResponse) -> Option<Decimal> {
    let expirations = chain.expirations()?;

    for strikes in expirations.values() {
        let Some(strikes) = strikes.as_object() else {
            continue;
        };

        for records in strikes.values() {
            let Some(records) = records.as_array() else {
                continue;
            };

            for record in records {
                if let Some(price) = record.get(LAST_PRICE_FIELD).and_then(parse_price) {
                    return Some(price);
                }
            }
        }
    }

    None
}

/// Interpret a JSON price value. Numbers and numeric strings are prices;
/// everything else is not.
///
/// A JSON number always counts as a carried price. One that does not fit a
/// `Decimal` reads as zero, which the ratio step rejects.
pub fn parse_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Some(decimal_from_str(&n.to_string()).unwrap_or_else(|| {
            tracing::debug!(value = %n, "Last price out of decimal range");
            Decimal::ZERO
        })),
        Value::String(s) => decimal_from_str(s.trim()),
        _ => None,
    }
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
