use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::state::AppState;

use super::controller::upload_file;

/// Room for multipart boundaries and the `folder` field on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn init_upload_router(max_file_size: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload_file))
        .layer(DefaultBodyLimit::max(max_file_size + MULTIPART_OVERHEAD))
}
