use sqlx::{FromRow, PgPool};
use tracing::{error, instrument, warn};

use bangbang_auth::issue_token;
use bangbang_config::JwtConfig;
use bangbang_core::{AppError, hash_password, verify_password};

use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto};
use crate::modules::users::model::{USER_COLUMNS, User};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequestDto,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (name, email, password, phone, address, role)
               VALUES ($1, $2, $3, $4, $5, 'customer')
               RETURNING {}"#,
            USER_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.phone)
        .bind(&dto.address)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("Email is already registered"));
            }
            error!(error = %e, "Failed to register user");
            AppError::database(e)
        })?;

        let token = issue_token(&user.identity(), jwt_config)?;
        Ok(AuthResponse { token, user })
    }

    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let row = sqlx::query_as::<_, UserWithPassword>(&format!(
            "SELECT {}, password FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(UserWithPassword { user, password }) = row else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &password)? {
            warn!(user.id = user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = issue_token(&user.identity(), jwt_config)?;
        Ok(AuthResponse { token, user })
    }
}
