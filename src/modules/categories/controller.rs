use axum::{Json, extract::State};
use tracing::instrument;

use bangbang_core::AppError;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::categories::model::CategoriesResponse;
use crate::modules::categories::service::CategoryService;
use crate::state::AppState;

/// List product categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let categories = CategoryService::list_categories(&state.db).await?;
    Ok(Json(CategoriesResponse { categories }))
}
