//! # streamgate-worker
//!
//! Background retention sweeps. Runs on an independent timer outside
//! the request path and only ever deletes rows that are already
//! terminal (ended publish sessions, revoked/expired login sessions),
//! so it never races the admission or authentication hot paths for
//! correctness — only for row visibility.

pub mod jobs;
pub mod scheduler;

pub use jobs::retention::RetentionSweeper;
pub use scheduler::RetentionScheduler;
