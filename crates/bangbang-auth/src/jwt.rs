//! Identity token codec.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`] and valid for
//! [`JwtConfig::token_expiry`] seconds. There is no revocation: a token stops
//! working when it expires or when the client discards it.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use bangbang_config::JwtConfig;
use bangbang_core::AppError;

use crate::claims::{Claims, Identity};

/// Signs a token for `identity`.
///
/// # Errors
///
/// Returns an internal error if encoding fails or the configured expiry would
/// place `exp` before the Unix epoch.
pub fn issue_token(identity: &Identity, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = usize::try_from(now + jwt_config.token_expiry)
        .map_err(|_| AppError::internal_error("Token expiry out of range".to_string()))?;

    let claims = Claims::new(identity, now as usize, exp);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// HS256 with no clock leeway: a token is dead the second `exp` passes.
fn strict_validation() -> Validation {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation
}

/// Verifies signature and expiry and returns the embedded identity.
///
/// Every failure (malformed, expired, wrong signature) yields `None`; the
/// reason is only visible in debug logs.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Option<Identity> {
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &strict_validation(),
    ) {
        Ok(data) => Some(data.claims.into()),
        Err(e) => {
            tracing::debug!(reason = %e, "Rejected identity token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 604800,
        }
    }

    fn test_identity(role: Role) -> Identity {
        Identity {
            id: 42,
            email: "baker@bangbang.com".to_string(),
            name: "Baker".to_string(),
            role,
        }
    }

    #[test]
    fn test_round_trip_returns_identity() {
        let config = test_config();
        for role in Role::ALL {
            let identity = test_identity(role);
            let token = issue_token(&identity, &config).unwrap();
            assert_eq!(decode_token(&token, &config), Some(identity));
        }
    }

    #[test]
    fn test_decode_invalid_token() {
        let config = test_config();
        assert_eq!(decode_token("invalid.token.here", &config), None);
        assert_eq!(decode_token("", &config), None);
    }

    #[test]
    fn test_decode_wrong_secret() {
        let token = issue_token(&test_identity(Role::Admin), &test_config()).unwrap();
        let other = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_expiry: 604800,
        };
        assert_eq!(decode_token(&token, &other), None);
    }

    #[test]
    fn test_decode_tampered_payload() {
        let config = test_config();
        let token = issue_token(&test_identity(Role::Customer), &config).unwrap();
        let forged = issue_token(&test_identity(Role::Superadmin), &config).unwrap();
        let forged_payload = forged.split('.').nth(1).unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = forged_payload;
        // Payload from one token with the signature of another.
        let spliced = parts.join(".");
        assert_eq!(decode_token(&spliced, &config), None);
    }

    #[test]
    fn test_expired_token_decodes_to_none() {
        let expired = JwtConfig {
            token_expiry: -3600,
            ..test_config()
        };
        let token = issue_token(&test_identity(Role::Superadmin), &expired).unwrap();
        assert_eq!(decode_token(&token, &test_config()), None);
    }

    #[test]
    fn test_recently_expired_token_decodes_to_none() {
        let just_expired = JwtConfig {
            token_expiry: -5,
            ..test_config()
        };
        let token = issue_token(&test_identity(Role::Superadmin), &just_expired).unwrap();
        assert_eq!(decode_token(&token, &just_expired), None);
    }

    #[test]
    fn test_expiry_claim_matches_config() {
        let config = test_config();
        let token = issue_token(&test_identity(Role::Staff), &config).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 604800);
    }
}
