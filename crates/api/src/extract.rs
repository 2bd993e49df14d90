//! Request extractors that reject with [`AppError`], so a bad path or query
//! string gets the same JSON error body as every other failure.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use promotions_core::types::DbId;
use promotions_db::models::promotion::PromotionFilter;

use crate::error::AppError;
use crate::query::ListPromotionsParams;

/// The `{id}` segment of `/promotions/{id}`.
///
/// A segment that is not an integer is a 404, not a 400.
#[derive(Debug, Clone, Copy)]
pub struct PromoId(pub DbId);

impl<S> FromRequestParts<S> for PromoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(PromoId(id))
    }
}

/// Validated `GET /promotions` filters.
#[derive(Debug)]
pub struct ListFilter(pub PromotionFilter);

impl<S> FromRequestParts<S> for ListFilter
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListPromotionsParams>::from_request_parts(parts, state).await?;
        Ok(ListFilter(params.into_filter()?))
    }
}
