//! Promotion field rules and payload parsing.
//!
//! Parsing works on the raw JSON value rather than a serde derive so that a
//! missing key or a wrongly-typed value is reported by field name, and so that
//! `active` only accepts a real boolean.

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a customer-facing promo code (matches `VARCHAR(63)`).
pub const MAX_PROMO_CODE_LENGTH: usize = 63;

/// Valid promotion type strings (stored in DB, case-sensitive).
pub const TYPE_PERCENT: &str = "PERCENT";
pub const TYPE_SAVING: &str = "SAVING";
pub const TYPE_BOGO: &str = "BOGO";

/// All valid promotion type strings.
pub const VALID_TYPES: &[&str] = &[TYPE_PERCENT, TYPE_SAVING, TYPE_BOGO];

/// Keys every create/update payload must carry, in the order they are checked.
pub const REQUIRED_FIELDS: &[&str] = &[
    "cust_promo_code",
    "type",
    "value",
    "quantity",
    "start_date",
    "end_date",
    "active",
    "product_id",
    "dev_created_at",
];

/// ISO-8601 calendar date, e.g. `2024-12-31`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a date field may carry. chrono parses signed and five-digit years
/// that a `DATE` column cannot store.
pub const MIN_DATE_YEAR: i32 = 1;
pub const MAX_DATE_YEAR: i32 = 9999;

// ---------------------------------------------------------------------------
// Promotion type
// ---------------------------------------------------------------------------

/// Kind of discount a promotion grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromotionType {
    /// Percentage off; `value` is the percentage.
    Percent,
    /// Fixed amount off; `value` is the amount.
    Saving,
    /// Buy one, get one.
    Bogo,
}

impl PromotionType {
    /// Parse from the exact member name. Lowercase or mixed case is rejected.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            TYPE_PERCENT => Ok(Self::Percent),
            TYPE_SAVING => Ok(Self::Saving),
            TYPE_BOGO => Ok(Self::Bogo),
            _ => Err(CoreError::Validation(format!(
                "Invalid type '{s}'. Must be one of: {}",
                VALID_TYPES.join(", ")
            ))),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percent => TYPE_PERCENT,
            Self::Saving => TYPE_SAVING,
            Self::Bogo => TYPE_BOGO,
        }
    }
}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Used by the row decoder, which reads the `type` column as text.
impl TryFrom<String> for PromotionType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Every client-writable promotion field, validated.
///
/// `promo_id` is deliberately absent: it is assigned by the store and any
/// value the client sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPayload {
    pub cust_promo_code: String,
    pub promo_type: PromotionType,
    pub value: Option<i32>,
    pub quantity: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub product_id: Option<i32>,
    pub dev_created_at: NaiveDate,
}

/// Parse and validate a promotion from a JSON request body.
///
/// Fails with [`CoreError::Validation`] when:
/// - the body is not a JSON object
/// - any key in [`REQUIRED_FIELDS`] is absent (the first missing key is named)
/// - `type` is not exactly one of [`VALID_TYPES`]
/// - `active` is not a JSON boolean
/// - an integer field holds a non-integer or overflows `i32`
/// - a date is not a `YYYY-MM-DD` string
///
/// `value`, `product_id`, `start_date` and `end_date` may be `null`. A `null`
/// `dev_created_at` falls back to today's UTC date. Unknown keys are ignored.
pub fn parse_payload(data: &Value) -> Result<PromotionPayload, CoreError> {
    let obj = data
        .as_object()
        .ok_or_else(|| invalid("body of request contained bad or no data"))?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !obj.contains_key(**key)) {
        return Err(invalid(format!("missing {missing}")));
    }

    let cust_promo_code = string_field(obj, "cust_promo_code")?;
    validate_promo_code(&cust_promo_code)?;

    let promo_type = PromotionType::from_str_value(&string_field(obj, "type")?)?;

    Ok(PromotionPayload {
        cust_promo_code,
        promo_type,
        value: optional_int_field(obj, "value")?,
        quantity: int_field(obj, "quantity")?,
        start_date: optional_date_field(obj, "start_date")?,
        end_date: optional_date_field(obj, "end_date")?,
        active: bool_field(obj, "active")?,
        product_id: optional_int_field(obj, "product_id")?,
        dev_created_at: optional_date_field(obj, "dev_created_at")?
            .unwrap_or_else(|| Utc::now().date_naive()),
    })
}

/// Validate a customer-facing promo code: non-empty, at most
/// [`MAX_PROMO_CODE_LENGTH`] characters.
pub fn validate_promo_code(code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        return Err(invalid("cust_promo_code must not be empty"));
    }
    if code.chars().count() > MAX_PROMO_CODE_LENGTH {
        return Err(invalid(format!(
            "cust_promo_code exceeds maximum length of {MAX_PROMO_CODE_LENGTH}"
        )));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date string with a year in
/// [`MIN_DATE_YEAR`]..=[`MAX_DATE_YEAR`].
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| invalid(format!("'{s}' is not an ISO-8601 date (YYYY-MM-DD)")))?;
    if !(MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&date.year()) {
        return Err(invalid(format!(
            "'{s}' is outside years {MIN_DATE_YEAR}..={MAX_DATE_YEAR}"
        )));
    }
    Ok(date)
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn invalid(reason: impl fmt::Display) -> CoreError {
    CoreError::Validation(format!("Invalid Promotion: {reason}"))
}

fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, CoreError> {
    obj.get(key).ok_or_else(|| invalid(format!("missing {key}")))
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Result<String, CoreError> {
    match field(obj, key)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(invalid(format!("{key} must be a string, got {other}"))),
    }
}

fn bool_field(obj: &Map<String, Value>, key: &str) -> Result<bool, CoreError> {
    match field(obj, key)? {
        Value::Bool(b) => Ok(*b),
        other => Err(invalid(format!("{key} must be a boolean, got {other}"))),
    }
}

fn int_field(obj: &Map<String, Value>, key: &str) -> Result<i32, CoreError> {
    optional_int_field(obj, key)?.ok_or_else(|| invalid(format!("{key} must not be null")))
}

fn optional_int_field(obj: &Map<String, Value>, key: &str) -> Result<Option<i32>, CoreError> {
    match field(obj, key)? {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(format!("{key} must be a 32-bit integer, got {n}"))),
        other => Err(invalid(format!("{key} must be an integer, got {other}"))),
    }
}

fn optional_date_field(
    obj: &Map<String, Value>,
    key: &str,
) -> Result<Option<NaiveDate>, CoreError> {
    match field(obj, key)? {
        Value::Null => Ok(None),
        Value::String(s) => parse_date(s)
            .map(Some)
            .map_err(|_| invalid(format!("{key} must be a YYYY-MM-DD date, got '{s}'"))),
        other => Err(invalid(format!("{key} must be a date string, got {other}"))),
    }
}
