use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
};
use tracing::instrument;

use bangbang_core::AppError;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::upload::model::{UploadFolder, UploadForm, UploadResponse};
use crate::modules::upload::service::UploadService;
use crate::state::AppState;

fn multipart_error(e: MultipartError) -> AppError {
    AppError::new(e.status(), anyhow::anyhow!(e.body_text()))
}

/// Upload a payment slip or product image
#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported type or too large", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse)
    ),
    tag = "Upload"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut folder = UploadFolder::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some((content_type, bytes.to_vec()));
            }
            Some("folder") => {
                let value = field.text().await.map_err(multipart_error)?;
                folder = value
                    .parse()
                    .map_err(|e: String| AppError::bad_request(anyhow::anyhow!(e)))?;
            }
            _ => {}
        }
    }

    let (content_type, content) =
        file.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("No file provided")))?;

    let response =
        UploadService::store_image(state.storage.as_ref(), folder, &content_type, &content)
            .await?;
    Ok(Json(response))
}
