//! Domain types and rules for the promotions service.
//!
//! This crate has no database or HTTP dependency. It owns the promotion
//! type enum, field constraints, payload parsing, and the shared error type.

pub mod error;
pub mod promotion;
pub mod types;
