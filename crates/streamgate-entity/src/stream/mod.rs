//! Stream entity and its protocol enum.

pub mod model;
pub mod protocol;

pub use model::Stream;
pub use protocol::StreamProtocol;
