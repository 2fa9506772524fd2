//! # BangBang Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Identity token signing secret and lifetime
//! - [`cors`]: Allowed browser origins
//! - [`storage`]: Upload directory and limits
//! - [`server`]: Listen address
//!
//! # Example
//!
//! ```ignore
//! use bangbang_config::{CorsConfig, JwtConfig, ServerConfig, StorageConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;
pub mod storage;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
