//! Token payload types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// Who is making the request, as asserted by a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// JWT claims: the identity fields plus issued-at and expiry timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn new(identity: &Identity, iat: usize, exp: usize) -> Self {
        Self {
            id: identity.id,
            email: identity.email.clone(),
            name: identity.name.clone(),
            role: identity.role,
            exp,
            iat,
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let identity = Identity {
            id: 7,
            email: "somchai@example.com".to_string(),
            name: "Somchai".to_string(),
            role: Role::Customer,
        };
        let serialized = serde_json::to_string(&Claims::new(&identity, 100, 200)).unwrap();
        assert!(serialized.contains(r#""id":7"#));
        assert!(serialized.contains(r#""role":"customer""#));
        assert!(serialized.contains(r#""exp":200"#));
    }

    #[test]
    fn test_claims_deserialize_rejects_unknown_role() {
        let json = r#"{"id":1,"email":"a@b.c","name":"A","role":"root","exp":1,"iat":0}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_identity_from_claims_drops_timestamps() {
        let claims = Claims {
            id: 3,
            email: "staff@bangbang.com".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
            exp: 9999999999,
            iat: 1234567890,
        };
        let identity = Identity::from(claims);
        assert_eq!(identity.id, 3);
        assert_eq!(identity.role, Role::Staff);
    }
}
