//! Total accessors over storage rows
//!
//! The hosted backend hands back flat JSON rows with snake_case fields,
//! nullable strings for dates, and numerics that may arrive as numbers or
//! strings. Record transformers are required to be total over any row of that
//! shape: missing optional fields default instead of erroring, and extra
//! fields are ignored. These helpers centralize that defaulting so every
//! domain's transformer reads the same way.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Returns a string field, defaulting to empty when absent or null
pub fn str_field(row: &Value, field: &str) -> String {
    row.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Returns a string field, or None when absent or null
pub fn opt_str_field(row: &Value, field: &str) -> Option<String> {
    row.get(field).and_then(Value::as_str).map(str::to_owned)
}

/// Returns a decimal field, defaulting to zero when absent, null, or unparseable
///
/// Accepts both JSON numbers and stringified numerics, which is how the
/// backend serializes its numeric columns depending on precision.
pub fn decimal_field(row: &Value, field: &str) -> Decimal {
    opt_decimal_field(row, field).unwrap_or_default()
}

/// Returns a decimal field, or None when absent, null, or unparseable
pub fn opt_decimal_field(row: &Value, field: &str) -> Option<Decimal> {
    match row.get(field) {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).ok(),
        Some(Value::String(s)) => Decimal::from_str(s).ok(),
        _ => None,
    }
}

/// Returns an integer field, defaulting to zero
pub fn int_field(row: &Value, field: &str) -> i64 {
    match row.get(field) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or_default(),
        Some(Value::String(s)) => s.parse().unwrap_or_default(),
        _ => 0,
    }
}

/// Parses a `YYYY-MM-DD` date field, or None when absent, null, or malformed
pub fn opt_date_field(row: &Value, field: &str) -> Option<NaiveDate> {
    row.get(field)
        .and_then(Value::as_str)
        .and_then(parse_date_str)
}

/// Parses a `YYYY-MM-DD` date field, defaulting to the Unix epoch date
pub fn date_field(row: &Value, field: &str) -> NaiveDate {
    opt_date_field(row, field).unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}

/// Parses an RFC 3339 timestamp field, or None when absent, null, or malformed
pub fn opt_timestamp_field(row: &Value, field: &str) -> Option<DateTime<Utc>> {
    row.get(field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a date from a storage string, tolerating a trailing timestamp part
fn parse_date_str(s: &str) -> Option<NaiveDate> {
    // Date columns arrive as "2025-09-10"; timestamp columns as
    // "2025-09-10T12:34:56+00:00". Take the date prefix either way.
    let date_part = s.split('T').next().unwrap_or(s);
    NaiveDate::from_str(date_part).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_str_field_defaults_empty() {
        let row = json!({"name": "Rice", "other": null});
        assert_eq!(str_field(&row, "name"), "Rice");
        assert_eq!(str_field(&row, "other"), "");
        assert_eq!(str_field(&row, "missing"), "");
    }

    #[test]
    fn test_opt_str_field_null_is_none() {
        let row = json!({"description": null});
        assert_eq!(opt_str_field(&row, "description"), None);
        assert_eq!(opt_str_field(&row, "missing"), None);
    }

    #[test]
    fn test_decimal_field_from_number_and_string() {
        let row = json!({"amount": 500.5, "rate": "50.00"});
        assert_eq!(decimal_field(&row, "amount"), dec!(500.5));
        assert_eq!(decimal_field(&row, "rate"), dec!(50.00));
        assert_eq!(decimal_field(&row, "missing"), Decimal::ZERO);
    }

    #[test]
    fn test_date_field_null_stays_none() {
        let row = json!({"last_purchase_date": null});
        assert_eq!(opt_date_field(&row, "last_purchase_date"), None);
    }

    #[test]
    fn test_date_field_parses_plain_date() {
        let row = json!({"last_purchase_date": "2025-09-10"});
        assert_eq!(
            opt_date_field(&row, "last_purchase_date"),
            NaiveDate::from_ymd_opt(2025, 9, 10)
        );
    }

    #[test]
    fn test_date_field_tolerates_timestamp() {
        let row = json!({"bill_date": "2025-09-10T08:30:00+00:00"});
        assert_eq!(
            date_field(&row, "bill_date"),
            NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_defaults() {
        let row = json!({"bill_date": "not-a-date"});
        assert_eq!(
            date_field(&row, "bill_date"),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        );
    }

    mod totality {
        use super::*;
        use proptest::prelude::*;

        // Accessors must accept any field content without panicking and
        // round-trip what they can actually represent.
        proptest! {
            #[test]
            fn test_accessors_never_panic_on_arbitrary_strings(s in "\\PC*") {
                let row = json!({ "f": s });
                let _ = str_field(&row, "f");
                let _ = opt_decimal_field(&row, "f");
                let _ = int_field(&row, "f");
                let _ = opt_date_field(&row, "f");
                let _ = opt_timestamp_field(&row, "f");
            }

            #[test]
            fn test_decimal_minor_units_round_trip(minor in -10_000_000i64..10_000_000i64) {
                let value = Decimal::new(minor, 2);
                let row = json!({ "amount": value.to_string() });
                prop_assert_eq!(decimal_field(&row, "amount"), value);
            }

            #[test]
            fn test_int_field_round_trips(n in proptest::num::i64::ANY) {
                let row = json!({ "count": n });
                prop_assert_eq!(int_field(&row, "count"), n);
            }
        }
    }
}
