use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_settings, update_settings};

pub fn init_settings_router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}
