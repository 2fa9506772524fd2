use sqlx::PgPool;
use tracing::{error, instrument};

use bangbang_core::{AppError, hash_password};

use crate::modules::users::model::{CreateUserDto, USER_COLUMNS, UpdateUserDto, User};

fn duplicate_email(e: sqlx::Error, email: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow::anyhow!("Email {} is already registered", email));
    }
    AppError::database(e)
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn get_user_by_id(db: &PgPool, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, user.id = id, "Failed to fetch user");
                AppError::database(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// All accounts, highest role first, then newest.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"SELECT {} FROM users
               ORDER BY CASE role
                   WHEN 'superadmin' THEN 0
                   WHEN 'admin' THEN 1
                   WHEN 'staff' THEN 2
                   ELSE 3
               END, created_at DESC"#,
            USER_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list users");
            AppError::database(e)
        })
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "users", user.email = %dto.email))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (name, email, password, phone, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.phone)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| duplicate_email(e, &dto.email))
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "users", user.id = id))]
    pub async fn update_user(db: &PgPool, id: i64, dto: &UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::get_user_by_id(db, id).await?;

        let role = dto.role.unwrap_or(existing.role);
        let name = dto.name.clone().unwrap_or(existing.name);
        let phone = match &dto.phone {
            Some(phone) => phone.clone(),
            None => existing.phone,
        };

        sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
               SET role = $1, name = $2, phone = $3, updated_at = NOW()
               WHERE id = $4
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(role)
        .bind(&name)
        .bind(&phone)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, user.id = id, "Failed to update user");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Deletes the account and returns it as it was.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "users", user.id = id))]
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, user.id = id, "Failed to delete user");
            AppError::database(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}
