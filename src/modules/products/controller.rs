use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use tracing::instrument;

use bangbang_core::AppError;

use crate::middleware::role::RequireStaff;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::products::model::{
    CreateProductDto, ProductFilterParams, ProductResponse, ProductsResponse, UpdateProductDto,
};
use crate::modules::products::service::ProductService;
use crate::state::AppState;
use crate::utils::audit::{AuditAction, AuditLogger, AuditTarget};
use crate::validator::ValidatedJson;

/// List products, optionally by category slug or featured flag
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilterParams),
    responses(
        (status = 200, description = "Products, featured first", body = ProductsResponse)
    ),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(filters): Query<ProductFilterParams>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = ProductService::list_products(&state.db, &filters).await?;
    Ok(Json(ProductsResponse { products }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = ProductService::get_product(&state.db, id).await?;
    Ok(Json(ProductResponse { product }))
}

/// Add a product (staff or above)
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires staff or above", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireStaff(actor): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = ProductService::create_product(&state.db, &dto).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::CreateProduct,
        AuditTarget::Product,
        Some(product.id),
        json!({ "name": product.name, "name_th": product.name_th, "price": product.price }),
        &headers,
    )
    .await;

    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// Partially update a product (staff or above)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires staff or above", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn update_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateProductDto>,
) -> Result<Json<ProductResponse>, AppError> {
    if dto.is_empty() {
        return Err(AppError::bad_request(anyhow::anyhow!("No fields to update")));
    }

    let product = ProductService::update_product(&state.db, id, &dto).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::UpdateProduct,
        AuditTarget::Product,
        Some(id),
        serde_json::to_value(&dto)?,
        &headers,
    )
    .await;

    Ok(Json(ProductResponse { product }))
}

/// Delete a product (staff or above)
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires staff or above", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    ),
    tag = "Catalog",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor), fields(actor.id = actor.id))]
pub async fn delete_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted_name = ProductService::delete_product(&state.db, id).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::DeleteProduct,
        AuditTarget::Product,
        Some(id),
        json!({ "deleted_name": deleted_name }),
        &headers,
    )
    .await;

    Ok(Json(MessageResponse::new("Product deleted")))
}
