//! Promotion entity model and filter DTO.

use chrono::NaiveDate;
use promotions_core::error::CoreError;
use promotions_core::promotion::{parse_payload, PromotionPayload, PromotionType};
use promotions_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A promotion row from the `promotions` table.
///
/// `promo_id` is `None` until the row has been inserted. Serializes with the
/// column names as keys, `type` as its member name and dates as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Promotion {
    pub promo_id: Option<DbId>,
    pub cust_promo_code: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub promo_type: PromotionType,
    pub value: Option<i32>,
    pub quantity: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    pub product_id: Option<i32>,
    pub dev_created_at: NaiveDate,
}

impl Promotion {
    /// Build an unsaved promotion from a JSON request body.
    ///
    /// Any `promo_id` in the body is ignored; see
    /// [`promotions_core::promotion::parse_payload`] for the validation rules.
    pub fn from_json(data: &serde_json::Value) -> Result<Self, CoreError> {
        parse_payload(data).map(Self::from_payload)
    }

    /// Build an unsaved promotion from an already-validated payload.
    pub fn from_payload(payload: PromotionPayload) -> Self {
        Self {
            promo_id: None,
            cust_promo_code: payload.cust_promo_code,
            promo_type: payload.promo_type,
            value: payload.value,
            quantity: payload.quantity,
            start_date: payload.start_date,
            end_date: payload.end_date,
            active: payload.active,
            product_id: payload.product_id,
            dev_created_at: payload.dev_created_at,
        }
    }

    /// Same record with a different identity.
    pub fn with_id(self, promo_id: DbId) -> Self {
        Self {
            promo_id: Some(promo_id),
            ..self
        }
    }
}

/// Optional list filters, combined with AND. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionFilter {
    pub cust_promo_code: Option<String>,
    pub promo_type: Option<PromotionType>,
    pub active: Option<bool>,
    pub product_id: Option<i32>,
}

impl PromotionFilter {
    /// True when no filter field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
