use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use bangbang_auth::{Identity, decode_token};
use bangbang_config::JwtConfig;
use bangbang_core::AppError;

use crate::state::AppState;

/// Uniform message for absent, malformed, expired and tampered credentials.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Returns the credential following the literal `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Decodes the caller's identity, or `None` for an anonymous caller.
pub fn authenticate(headers: &HeaderMap, jwt_config: &JwtConfig) -> Option<Identity> {
    bearer_token(headers).and_then(|token| decode_token(token, jwt_config))
}

/// Extractor that requires a valid identity token (401 otherwise).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, &state.jwt_config)
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(UNAUTHORIZED_MESSAGE.to_string()))
    }
}

/// Extractor for endpoints open to guests: an invalid token is treated as no token.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(authenticate(&parts.headers, &state.jwt_config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use bangbang_auth::{Role, issue_token};

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret-key-32-characters".to_string(),
            token_expiry: 3600,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_requires_exact_prefix() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers_with("bearer abc.def")), None);
        assert_eq!(bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate_valid_token() {
        let identity = Identity {
            id: 9,
            email: "staff@bangbang.com".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
        };
        let token = issue_token(&identity, &config()).unwrap();
        let headers = headers_with(&format!("Bearer {}", token));

        assert_eq!(authenticate(&headers, &config()), Some(identity));
    }

    #[test]
    fn test_authenticate_invalid_token_is_anonymous() {
        let headers = headers_with("Bearer not-a-jwt");
        assert_eq!(authenticate(&headers, &config()), None);
    }
}
