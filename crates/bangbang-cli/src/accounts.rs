//! Back-office account creation.

use anyhow::{Context, bail};
use sqlx::PgPool;
use validator::ValidateEmail;

use bangbang_auth::Role;
use bangbang_core::hash_password;

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            bail!("Name is required");
        }
        if !self.email.validate_email() {
            bail!("Invalid email format");
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            bail!("Password must be at least {MIN_PASSWORD_LENGTH} characters");
        }
        Ok(())
    }
}

/// Inserts a superadmin and returns its id. Fails if the email is taken.
pub async fn create_superadmin(db: &PgPool, account: &NewAccount) -> anyhow::Result<i64> {
    account.validate()?;

    let hashed_password = hash_password(&account.password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(account.name.trim())
    .bind(&account.email)
    .bind(&hashed_password)
    .bind(Role::Superadmin)
    .fetch_optional(db)
    .await
    .context("Failed to insert superadmin")?;

    match id {
        Some(id) => Ok(id),
        None => bail!("User with this email already exists"),
    }
}
