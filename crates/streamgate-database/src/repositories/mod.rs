//! Table repositories. One struct per table, string queries, errors
//! mapped into [`streamgate_core::AppError`].

pub mod login_session;
pub mod publish_session;
pub mod stream;
pub mod user;
