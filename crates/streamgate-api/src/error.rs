//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` mapping and the `ApiErrorResponse` body
//! live in `streamgate-core` (where `AppError` is defined) so that the
//! implementation satisfies the orphan rule. This module re-exports the
//! response body for API consumers.

pub use streamgate_core::error::ApiErrorResponse;
