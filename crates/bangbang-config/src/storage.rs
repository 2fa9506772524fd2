use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory uploads are written to and served from.
    pub upload_dir: PathBuf,
    /// URL prefix returned to clients for stored files.
    pub public_base_url: String,
    pub max_file_size: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/uploads")),
            public_base_url: env::var("UPLOAD_BASE_URL").unwrap_or_else(|_| "/uploads".to_string()),
            max_file_size: crate::env_or("UPLOAD_MAX_BYTES", 5 * 1024 * 1024),
        }
    }
}
