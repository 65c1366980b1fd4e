//! # streamgate-engine
//!
//! Client for the external media engine's query/control API. The engine
//! performs the actual ingestion; this crate only asks it what is live
//! and disconnects clients on request.
//!
//! Every call degrades when the engine is unreachable: listings come
//! back empty, kicks report `false`, health reports unhealthy. The
//! control plane must keep answering even with the engine down.

pub mod client;
pub mod http;
pub mod mock;
pub mod types;

pub use client::MediaEngineClient;
pub use http::HttpMediaEngineClient;
pub use types::{EngineHealth, EngineStream};
