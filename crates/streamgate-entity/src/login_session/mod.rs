//! Login session entity.

pub mod model;

pub use model::{CreateLoginSession, LoginSession};
