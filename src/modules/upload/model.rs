use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

/// Sub-directory an upload is filed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadFolder {
    #[default]
    General,
    Slips,
    Products,
}

impl UploadFolder {
    pub const fn as_str(self) -> &'static str {
        match self {
            UploadFolder::General => "general",
            UploadFolder::Slips => "slips",
            UploadFolder::Products => "products",
        }
    }
}

impl FromStr for UploadFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "general" => Ok(UploadFolder::General),
            "slips" => Ok(UploadFolder::Slips),
            "products" => Ok(UploadFolder::Products),
            other => Err(format!(
                "Unknown folder '{}'. Allowed: general, slips, products",
                other
            )),
        }
    }
}

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// JPEG, PNG, WebP or GIF, at most 5 MB
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// `general` (default), `slips` or `products`
    pub folder: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Public URL of the stored file
    pub url: String,
    pub filename: String,
}
