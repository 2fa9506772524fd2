use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

const MAX_KEY_LENGTH: usize = 255;

#[derive(Debug, Clone, FromRow)]
pub struct Setting {
    pub setting_key: String,
    pub setting_value: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    /// Shop settings such as `shop_name`, `bank_account` or `qr_image`
    #[schema(value_type = Object)]
    pub settings: BTreeMap<String, Option<String>>,
}

/// Key/value pairs to upsert, e.g. `{"shop_name": "BangBang Bakery"}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UpdateSettingsDto(pub BTreeMap<String, String>);

impl UpdateSettingsDto {
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Validate for UpdateSettingsDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if !self
            .0
            .keys()
            .any(|key| key.trim().is_empty() || key.len() > MAX_KEY_LENGTH)
        {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        errors.add(
            "settings",
            ValidationError::new("key").with_message("Setting keys must be 1-255 characters".into()),
        );
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_settings_parses_flat_object() {
        let dto: UpdateSettingsDto =
            serde_json::from_str(r#"{"shop_name":"BangBang","bank_account":"123-4-56789-0"}"#)
                .unwrap();
        assert_eq!(dto.keys(), vec!["bank_account", "shop_name"]);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_settings_rejects_blank_key() {
        let dto: UpdateSettingsDto = serde_json::from_str(r#"{" ":"x"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_settings_rejects_non_string_values() {
        assert!(serde_json::from_str::<UpdateSettingsDto>(r#"{"shop_name":{"a":1}}"#).is_err());
    }

    #[test]
    fn test_empty_update() {
        let dto: UpdateSettingsDto = serde_json::from_str("{}").unwrap();
        assert!(dto.is_empty());
    }
}
