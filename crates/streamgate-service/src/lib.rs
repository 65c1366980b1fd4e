//! # streamgate-service
//!
//! Ingest domain services: stream key validation, publish admission
//! control, and reconciliation of the local session store against the
//! media engine's live list.

pub mod context;
pub mod ingest;

pub use context::RequestContext;
pub use ingest::admission::{AdmissionController, AdmissionDecision};
pub use ingest::reconciler::{ActiveSession, SessionReconciler};
pub use ingest::validator::{KeyValidation, RejectReason, StreamKeyValidator};
