//! Role-hierarchy authorization.
//!
//! Two layers:
//! 1. Plain functions ([`require_min_role`], [`require_exact_role`]) that turn
//!    request headers into an optional identity.
//! 2. Extractors ([`RequireStaff`], [`RequireAdmin`], [`RequireSuperadmin`])
//!    that map the outcome to 401 (no identity) or 403 (identity without
//!    enough privilege).

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

use bangbang_auth::{Identity, Role, RoleRequirement};
use bangbang_config::JwtConfig;
use bangbang_core::AppError;

use crate::middleware::auth::{UNAUTHORIZED_MESSAGE, authenticate};
use crate::state::AppState;

/// Identity of the caller iff its role level is at least `minimum`.
pub fn require_min_role(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
    minimum: Role,
) -> Option<Identity> {
    authenticate(headers, jwt_config).filter(|identity| identity.role.satisfies(minimum))
}

/// Identity of the caller iff its role is exactly `required`.
pub fn require_exact_role(
    headers: &HeaderMap,
    jwt_config: &JwtConfig,
    required: Role,
) -> Option<Identity> {
    authenticate(headers, jwt_config).filter(|identity| identity.role.is_exactly(required))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    Unauthenticated,
    Forbidden(RoleRequirement),
}

impl From<AccessDenied> for AppError {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::Unauthenticated => {
                AppError::unauthorized(UNAUTHORIZED_MESSAGE.to_string())
            }
            AccessDenied::Forbidden(requirement) => AppError::forbidden(format!(
                "Access denied. Requires {} privileges.",
                requirement
            )),
        }
    }
}

/// Checks an already-decoded identity against a requirement.
pub fn authorize(
    identity: Option<Identity>,
    requirement: RoleRequirement,
) -> Result<Identity, AccessDenied> {
    let identity = identity.ok_or(AccessDenied::Unauthenticated)?;
    if requirement.is_met_by(identity.role) {
        Ok(identity)
    } else {
        Err(AccessDenied::Forbidden(requirement))
    }
}

macro_rules! require_role {
    ($(#[$meta:meta])* $name:ident, $requirement:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub Identity);

        impl $name {
            pub const REQUIREMENT: RoleRequirement = $requirement;
        }

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let identity = authenticate(&parts.headers, &state.jwt_config);
                let identity = authorize(identity, Self::REQUIREMENT).map_err(|denied| {
                    tracing::debug!(
                        requirement = %Self::REQUIREMENT,
                        path = %parts.uri.path(),
                        "Role gate rejected request"
                    );
                    AppError::from(denied)
                })?;
                Ok($name(identity))
            }
        }
    };
}

require_role!(
    /// Staff, admin or superadmin.
    RequireStaff,
    RoleRequirement::AtLeast(Role::Staff)
);
require_role!(
    /// Admin or superadmin.
    RequireAdmin,
    RoleRequirement::AtLeast(Role::Admin)
);
require_role!(
    /// Exactly superadmin.
    RequireSuperadmin,
    RoleRequirement::Exactly(Role::Superadmin)
);

/// Rejects an operation whose target is the caller's own account.
pub fn reject_self_target(actor: &Identity, target_id: i64) -> Result<(), AppError> {
    if actor.id == target_id {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "You cannot perform this action on your own account"
        )));
    }
    Ok(())
}
