pub mod health;
pub mod promotions;

use axum::http::Uri;

use crate::error::AppError;

/// Fallback for paths no route matches: a JSON 404 like every other error.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No resource at {}", uri.path()))
}
