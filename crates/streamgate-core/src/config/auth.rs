//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours. Tokens and their login sessions share
    /// this expiry.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,
}

fn default_token_ttl_hours() -> u64 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_defaults_to_24h() {
        let config: AuthConfig = serde_json::from_str(r#"{"jwt_secret":"s"}"#).unwrap();
        assert_eq!(config.token_ttl_hours, 24);
    }
}
