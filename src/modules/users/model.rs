//! User accounts and back-office user management DTOs.
//!
//! - [`User`] - account as returned to clients (never includes the password hash)
//! - [`CreateUserDto`] - superadmin creates a staff, admin or superadmin account
//! - [`UpdateUserDto`] - superadmin changes role, name or phone of another account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use bangbang_auth::{Identity, Role};

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Token payload for this account.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Column list matching [`User`].
pub(crate) const USER_COLUMNS: &str =
    "id, name, email, phone, address, role, created_at, updated_at";

fn validate_back_office_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_back_office() {
        Ok(())
    } else {
        Err(ValidationError::new("back_office_role")
            .with_message("Role must be staff, admin or superadmin".into()))
    }
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_back_office_role"))]
    pub role: Role,
}

const MAX_PHONE_LENGTH: usize = 20;

/// `Some(None)` for an explicit `null`, `None` when the key is absent.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_update_phone(dto: &UpdateUserDto) -> Result<(), ValidationError> {
    match &dto.phone {
        Some(Some(phone)) if phone.chars().count() > MAX_PHONE_LENGTH => {
            Err(ValidationError::new("phone")
                .with_message("Phone must be at most 20 characters".into()))
        }
        _ => Ok(()),
    }
}

/// Partial update; absent fields are left untouched and `"phone": null`
/// clears the phone number.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate, ToSchema)]
#[validate(schema(function = "validate_update_phone"))]
pub struct UpdateUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[validate(length(min = 1, max = 255, message = "Name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
}

impl UpdateUserDto {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.name.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}
