use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_order, get_order, get_orders, update_order_status};

pub fn init_orders_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_orders).post(create_order))
        .route("/{id}", get(get_order).put(update_order_status))
}
