use chrono::Utc;
use tracing::{error, info, instrument};

use bangbang_core::AppError;
use bangbang_core::file_storage::{FileStorage, StorageError, image_extension};

use crate::modules::upload::model::{UploadFolder, UploadResponse};

fn storage_error(e: StorageError) -> AppError {
    if e.is_client_error() {
        AppError::bad_request(e)
    } else {
        error!(error = %e, "File storage failure");
        AppError::internal(e)
    }
}

/// Unique file name: upload time plus a random suffix.
pub(crate) fn generate_filename(extension: &str) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}.{}",
        Utc::now().timestamp_millis(),
        &suffix[..8],
        extension
    )
}

pub struct UploadService;

impl UploadService {
    #[instrument(skip(storage, content), fields(upload.folder = folder.as_str(), upload.bytes = content.len()))]
    pub async fn store_image(
        storage: &dyn FileStorage,
        folder: UploadFolder,
        content_type: &str,
        content: &[u8],
    ) -> Result<UploadResponse, AppError> {
        storage
            .validate(content_type, content.len())
            .map_err(storage_error)?;

        let extension = image_extension(content_type).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Unsupported image type {}", content_type))
        })?;
        let filename = generate_filename(extension);
        let key = format!("{}/{}", folder.as_str(), filename);

        let key = storage.save(&key, content).await.map_err(storage_error)?;
        let url = storage.get_url(&key).map_err(storage_error)?;

        info!(upload.key = %key, "Image uploaded");
        Ok(UploadResponse { url, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use bangbang_core::file_storage::LocalFileStorage;
    use std::path::PathBuf;

    #[test]
    fn test_generate_filename_is_unique() {
        let first = generate_filename("png");
        let second = generate_filename("png");
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_image_rejects_non_images() {
        let storage = LocalFileStorage::new(PathBuf::from("./unused"), "/uploads".to_string());
        let err = UploadService::store_image(
            &storage,
            UploadFolder::General,
            "application/pdf",
            b"%PDF",
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_image_writes_file_and_returns_url() {
        let dir = std::env::temp_dir().join(format!("bangbang-upload-{}", std::process::id()));
        let storage = LocalFileStorage::new(dir.clone(), "/uploads".to_string());

        let response =
            UploadService::store_image(&storage, UploadFolder::Slips, "image/png", b"png")
                .await
                .unwrap();

        assert!(response.url.starts_with("/uploads/slips/"));
        assert!(response.url.ends_with(&response.filename));
        let stored = dir.join("slips").join(&response.filename);
        assert!(stored.exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
