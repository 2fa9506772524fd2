//! # BangBang CLI
//!
//! Administrative helpers used by the `bangbang-cli` binary:
//!
//! - [`accounts`]: creating the superadmin account
//! - [`seeder`]: demo catalog, shop settings and accounts for a fresh database
//!
//! ## Usage
//!
//! ```ignore
//! use bangbang_cli::seeder::seed_all;
//!
//! seed_all(&pool).await?;
//! ```

pub mod accounts;
pub mod seeder;
