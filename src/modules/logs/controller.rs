use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use bangbang_core::AppError;

use crate::middleware::role::RequireAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::logs::model::{LogFilterParams, LogsResponse};
use crate::modules::logs::service::LogService;
use crate::state::AppState;

/// Back-office activity log (admin or above)
#[utoipa::path(
    get,
    path = "/api/admin/logs",
    params(LogFilterParams),
    responses(
        (status = 200, description = "Log entries, newest first", body = LogsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires admin or above", body = ErrorResponse)
    ),
    tag = "Admin Logs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn get_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filters): Query<LogFilterParams>,
) -> Result<Json<LogsResponse>, AppError> {
    let logs = LogService::list_logs(&state.db, &filters).await?;
    Ok(Json(logs))
}
