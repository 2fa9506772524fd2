use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use tracing::instrument;

use bangbang_core::AppError;

use crate::middleware::role::{RequireAdmin, RequireSuperadmin, reject_self_target};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::users::model::{CreateUserDto, UpdateUserDto, UserResponse, UsersResponse};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::audit::{AuditAction, AuditLogger, AuditTarget};
use crate::validator::ValidatedJson;

/// List every account (admin or above)
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Accounts, highest role first", body = UsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires admin or above", body = ErrorResponse)
    ),
    tag = "Admin Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<UsersResponse>, AppError> {
    let users = UserService::list_users(&state.db).await?;
    Ok(Json(UsersResponse { users }))
}

/// Create a back-office account (superadmin only)
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Superadmin only", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Admin Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireSuperadmin(actor): RequireSuperadmin,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::CreateUser,
        AuditTarget::User,
        Some(user.id),
        json!({ "name": user.name, "email": user.email, "role": user.role }),
        &headers,
    )
    .await;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Change role, name or phone of another account (superadmin only)
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 400, description = "Own account or nothing to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Superadmin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Admin Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireSuperadmin(actor): RequireSuperadmin,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    reject_self_target(&actor, id)?;

    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
    }

    let user = UserService::update_user(&state.db, id, &dto).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::UpdateUser,
        AuditTarget::User,
        Some(id),
        serde_json::to_value(&dto)?,
        &headers,
    )
    .await;

    Ok(Json(UserResponse { user }))
}

/// Delete another account (superadmin only)
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Own account", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Superadmin only", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Admin Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor), fields(actor.id = actor.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireSuperadmin(actor): RequireSuperadmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    reject_self_target(&actor, id)?;

    let deleted = UserService::delete_user(&state.db, id).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::DeleteUser,
        AuditTarget::User,
        Some(id),
        json!({
            "deleted_name": deleted.name,
            "deleted_email": deleted.email,
            "deleted_role": deleted.role,
        }),
        &headers,
    )
    .await;

    Ok(Json(MessageResponse::new("User deleted")))
}
