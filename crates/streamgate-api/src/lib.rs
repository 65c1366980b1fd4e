//! # streamgate-api
//!
//! HTTP layer: the engine-facing webhook endpoints under `/hooks` and
//! the UI-facing control-plane API under `/api`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
