//! # BangBang Auth
//!
//! Identity tokens and the role hierarchy.
//!
//! - [`role`]: [`Role`] and its level table (customer < staff < admin < superadmin)
//! - [`claims`]: The [`Identity`] carried by a token and its JWT [`Claims`]
//! - [`jwt`]: [`issue_token`] / [`decode_token`]
//!
//! Decoding never fails loudly: any malformed, expired or tampered token decodes
//! to `None`, which callers treat exactly like a missing credential.
//!
//! # Example
//!
//! ```ignore
//! use bangbang_auth::{Identity, Role, decode_token, issue_token};
//! use bangbang_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let identity = Identity {
//!     id: 1,
//!     email: "admin@bangbang.com".to_string(),
//!     name: "Admin".to_string(),
//!     role: Role::Admin,
//! };
//!
//! let token = issue_token(&identity, &config)?;
//! assert_eq!(decode_token(&token, &config), Some(identity));
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::{Claims, Identity};
pub use jwt::{decode_token, issue_token};
pub use role::{Role, RoleRequirement};
