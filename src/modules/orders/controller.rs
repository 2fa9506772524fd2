use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use tracing::instrument;

use bangbang_core::AppError;

use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::role::RequireStaff;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::orders::model::{
    CreateOrderDto, OrderFilterParams, OrderLookupParams, OrderResponse, OrdersResponse,
    UpdateOrderStatusDto,
};
use crate::modules::orders::service::{OrderService, can_view_order, list_scope};
use crate::state::AppState;
use crate::utils::audit::{AuditAction, AuditLogger, AuditTarget};
use crate::validator::ValidatedJson;

/// List orders visible to the caller
#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderFilterParams),
    responses(
        (status = 200, description = "Orders with their items, newest first", body = OrdersResponse),
        (status = 400, description = "Guest without phone number", body = ErrorResponse)
    ),
    tag = "Orders",
    security((), ("bearer_auth" = []))
)]
#[instrument(skip(state, caller))]
pub async fn get_orders(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Query(filters): Query<OrderFilterParams>,
) -> Result<Json<OrdersResponse>, AppError> {
    let scope = list_scope(caller.as_ref(), &filters)?;
    let orders = OrderService::list_orders(&state.db, &scope).await?;
    Ok(Json(OrdersResponse { orders }))
}

/// Place an order; a bearer token links it to the account
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderDto,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Unknown or out-of-stock product", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Orders",
    security((), ("bearer_auth" = []))
)]
#[instrument(skip(state, caller, dto))]
pub async fn create_order(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    ValidatedJson(dto): ValidatedJson<CreateOrderDto>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let user_id = caller.map(|identity| identity.id);
    let order = OrderService::create_order(&state.db, &dto, user_id).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}

/// Order detail
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID"), OrderLookupParams),
    responses(
        (status = 200, description = "Order with items", body = OrderResponse),
        (status = 404, description = "Order not found or not visible to the caller", body = ErrorResponse)
    ),
    tag = "Orders",
    security((), ("bearer_auth" = []))
)]
#[instrument(skip(state, caller, lookup))]
pub async fn get_order(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(id): Path<i64>,
    Query(lookup): Query<OrderLookupParams>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = OrderService::get_order(&state.db, id).await?;

    if !can_view_order(&order.order, caller.as_ref(), lookup.phone.as_deref()) {
        return Err(AppError::not_found(anyhow::anyhow!("Order not found")));
    }

    Ok(Json(OrderResponse { order }))
}

/// Change order status (staff or above)
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires staff or above", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    tag = "Orders",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, headers, actor, dto), fields(actor.id = actor.id))]
pub async fn update_order_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateOrderStatusDto>,
) -> Result<Json<OrderResponse>, AppError> {
    let previous_status = OrderService::update_status(&state.db, id, dto.status).await?;

    AuditLogger::record(
        &state.db,
        &actor,
        AuditAction::UpdateOrderStatus,
        AuditTarget::Order,
        Some(id),
        json!({ "status": dto.status, "previous_status": previous_status }),
        &headers,
    )
    .await;

    let order = OrderService::get_order(&state.db, id).await?;
    Ok(Json(OrderResponse { order }))
}
