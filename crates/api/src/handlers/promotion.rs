//! Handlers for the `/promotions` resource.

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use promotions_core::error::CoreError;
use promotions_core::types::DbId;
use promotions_db::models::promotion::Promotion;
use promotions_db::repositories::PromotionRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ListFilter, PromoId};
use crate::middleware::content_type::JsonBody;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Promotion",
        id,
    })
}

/// Path of the read endpoint for one promotion.
pub fn promotion_location(id: DbId) -> String {
    format!("/promotions/{id}")
}

/// POST /promotions
///
/// Responds 201 with the stored record and a `Location` header.
pub async fn create(
    State(state): State<AppState>,
    body: JsonBody,
) -> AppResult<impl IntoResponse> {
    tracing::info!("Request to create a promotion");

    let promotion = Promotion::from_json(&body.into_value()?)?;
    let created = PromotionRepo::create(&state.pool, &promotion).await?;
    let id = created
        .promo_id
        .ok_or_else(|| AppError::InternalError("Insert returned no promo_id".into()))?;

    tracing::info!(promo_id = id, "Promotion created");

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(LOCATION, promotion_location(id))]),
        Json(created),
    ))
}

/// GET /promotions
///
/// Optional filters: `cust_promo_code`, `type`, `active`, `product_id`.
pub async fn list(
    State(state): State<AppState>,
    ListFilter(filter): ListFilter,
) -> AppResult<Json<Vec<Promotion>>> {
    tracing::info!("Request for promotion list");

    let promotions = if filter.is_empty() {
        PromotionRepo::list(&state.pool).await?
    } else {
        PromotionRepo::list_filtered(&state.pool, &filter).await?
    };

    tracing::info!(count = promotions.len(), "Returning promotions");
    Ok(Json(promotions))
}

/// GET /promotions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PromoId(id): PromoId,
) -> AppResult<Json<Promotion>> {
    tracing::info!(promo_id = id, "Request for promotion");

    let promotion = PromotionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(promotion))
}

/// PUT /promotions/{id}
///
/// Replaces every writable field. The id in the path wins over any
/// `promo_id` in the body. An unknown id is a 404 even when the body would
/// not parse.
pub async fn update(
    State(state): State<AppState>,
    PromoId(id): PromoId,
    body: JsonBody,
) -> AppResult<Json<Promotion>> {
    tracing::info!(promo_id = id, "Request to update promotion");

    if PromotionRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }

    let promotion = Promotion::from_json(&body.into_value()?)?.with_id(id);
    let updated = PromotionRepo::update(&state.pool, &promotion)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(promo_id = id, "Promotion updated");
    Ok(Json(updated))
}

/// DELETE /promotions/{id}
///
/// Always 204; deleting an id that does not exist is not an error.
pub async fn delete(State(state): State<AppState>, PromoId(id): PromoId) -> AppResult<StatusCode> {
    tracing::info!(promo_id = id, "Request to delete promotion");

    let deleted = PromotionRepo::delete(&state.pool, id).await?;

    tracing::info!(promo_id = id, deleted, "Promotion delete complete");
    Ok(StatusCode::NO_CONTENT)
}
