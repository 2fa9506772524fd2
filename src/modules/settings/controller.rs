use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde_json::json;
use tracing::instrument;

use bangbang_core::AppError;

use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::settings::model::{SettingsResponse, UpdateSettingsDto};
use crate::modules::settings::service::SettingsService;
use crate::state::AppState;
use crate::utils::audit::{AuditAction, AuditLogger, AuditTarget};
use crate::validator::ValidatedJson;

/// Shop settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "All settings as a key/value map", body = SettingsResponse)
    ),
    tag = "Settings"
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = SettingsService::get_settings(&state.db).await?;
    Ok(Json(SettingsResponse { settings }))
}

/// Upsert settings (admin or above)
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsDto,
    responses(
        (status = 200, description = "Settings after the update", body = SettingsResponse),
        (status = 400, description = "Empty update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires admin or above", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireAdmin(actor): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<UpdateSettingsDto>,
) -> Result<Json<SettingsResponse>, AppError> {
    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("No settings to update")));
    }

    SettingsService::update_settings(&state.db, &dto).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::UpdateSettings,
        AuditTarget::Settings,
        None,
        json!({ "keys": dto.keys() }),
        &headers,
    )
    .await;

    let settings = SettingsService::get_settings(&state.db).await?;
    Ok(Json(SettingsResponse { settings }))
}
