//! # streamgate-entity
//!
//! Domain entity models for StreamGate. Each module holds one table's
//! row struct plus its create/update companions and enums.

pub mod login_session;
pub mod publish_session;
pub mod stream;
pub mod user;
