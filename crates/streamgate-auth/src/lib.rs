//! # streamgate-auth
//!
//! Token issuance and validation, password hashing, and the
//! login-session lifecycle (per-user cap, eviction, revocation).
//!
//! Authentication is a two-layer check: the token's own signature and
//! expiry, then the server-side login session looked up by the token's
//! hash. Revoking the session invalidates the token immediately, well
//! before its signed expiry.

pub mod jwt;
pub mod password;
pub mod session;
pub mod token_hash;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::service::{AuthenticatedUser, LoginResult, TokenService};
pub use session::store::LoginSessionStore;
pub use token_hash::hash_token;
