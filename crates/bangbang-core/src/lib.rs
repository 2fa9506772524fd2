//! # BangBang Core
//!
//! Core types, errors, and utilities shared by the BangBang bakery API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Limit/offset pagination helpers
//! - [`password`]: bcrypt password hashing and verification
//! - [`file_storage`]: Storage backend for uploaded images
//!
//! # Example
//!
//! ```ignore
//! use bangbang_core::{AppError, hash_password};
//!
//! let hash = hash_password("secret123")?;
//! let error = AppError::not_found(anyhow::anyhow!("Product not found"));
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;

pub use errors::AppError;
pub use pagination::PaginationParams;
pub use password::{hash_password, verify_password};
