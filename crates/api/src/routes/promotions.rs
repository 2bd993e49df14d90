//! Route definitions for the promotions resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::promotion;
use crate::state::AppState;

/// Promotion routes, mounted at the root.
///
/// ```text
/// GET    /promotions        -> list
/// POST   /promotions        -> create
/// GET    /promotions/{id}   -> get_by_id
/// PUT    /promotions/{id}   -> update
/// DELETE /promotions/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/promotions", get(promotion::list).post(promotion::create))
        .route(
            "/promotions/{id}",
            get(promotion::get_by_id)
                .put(promotion::update)
                .delete(promotion::delete),
        )
}
