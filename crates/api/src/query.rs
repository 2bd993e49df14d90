//! Query parameter types for API handlers.

use promotions_core::promotion::PromotionType;
use promotions_db::models::promotion::PromotionFilter;
use serde::Deserialize;

use crate::error::AppResult;

/// Filters accepted by `GET /promotions`
/// (`?cust_promo_code=&type=&active=&product_id=`).
///
/// `type` is kept as a raw string here so that a wrong-case value is reported
/// through the same validation error as a bad request body.
#[derive(Debug, Default, Deserialize)]
pub struct ListPromotionsParams {
    pub cust_promo_code: Option<String>,
    #[serde(rename = "type")]
    pub promo_type: Option<String>,
    pub active: Option<bool>,
    pub product_id: Option<i32>,
}

impl ListPromotionsParams {
    /// Validate and convert into a repository filter.
    pub fn into_filter(self) -> AppResult<PromotionFilter> {
        let promo_type = self
            .promo_type
            .as_deref()
            .map(PromotionType::from_str_value)
            .transpose()?;

        Ok(PromotionFilter {
            cust_promo_code: self.cust_promo_code,
            promo_type,
            active: self.active,
            product_id: self.product_id,
        })
    }
}
