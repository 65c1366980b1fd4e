//! Publish session entity.

pub mod model;

pub use model::{CreatePublishSession, PublishSession};
