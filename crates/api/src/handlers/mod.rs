//! Request handlers.
//!
//! Handlers delegate to the repositories in `promotions_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod promotion;
