//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use streamgate_core::config::auth::AuthConfig;
use streamgate_core::error::AppError;

use super::claims::Claims;

/// Validates bearer token signature and expiry.
///
/// This is only the first layer of authentication; the session-table
/// lookup happens afterwards in the token service.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string (signature + expiry).
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::{SubsecRound, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use streamgate_core::config::auth::AuthConfig;
    use streamgate_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
        }
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "ops".to_string(),
            password_hash: String::new(),
            role: UserRole::Operator,
            is_active: true,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_round_trip() {
        let config = config("test-secret");
        let encoder = JwtEncoder::new(&config);
        let decoder = JwtDecoder::new(&config);
        let user = user();

        let issued = encoder.issue(&user).unwrap();
        let claims = decoder.decode_token(&issued.token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, "ops");
        assert_eq!(claims.role, UserRole::Operator);
        assert_eq!(claims.expires_at(), issued.expires_at.trunc_subsecs(0));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = JwtEncoder::new(&config("secret-a"));
        let decoder = JwtDecoder::new(&config("secret-b"));

        let issued = encoder.issue(&user()).unwrap();
        let err = decoder.decode_token(&issued.token).unwrap_err();
        assert_eq!(err.message, "Invalid token signature");
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = config("test-secret");
        let decoder = JwtDecoder::new(&config);

        let now = Utc::now();
        let claims = crate::jwt::Claims {
            sub: Uuid::new_v4(),
            username: "ops".to_string(),
            role: UserRole::Viewer,
            iat: (now - chrono::Duration::hours(25)).timestamp(),
            exp: (now - chrono::Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = decoder.decode_token(&token).unwrap_err();
        assert_eq!(err.message, "Token has expired");
    }

    #[test]
    fn test_garbage_rejected() {
        let decoder = JwtDecoder::new(&config("test-secret"));
        assert!(decoder.decode_token("not-a-token").is_err());
    }
}
