use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_logs;

pub fn init_logs_router() -> Router<AppState> {
    Router::new().route("/", get(get_logs))
}
