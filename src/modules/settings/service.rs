use std::collections::BTreeMap;

use sqlx::PgPool;
use tracing::{error, instrument};

use bangbang_core::AppError;

use crate::modules::settings::model::{Setting, UpdateSettingsDto};

pub struct SettingsService;

impl SettingsService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "settings"))]
    pub async fn get_settings(db: &PgPool) -> Result<BTreeMap<String, Option<String>>, AppError> {
        let rows = sqlx::query_as::<_, Setting>("SELECT setting_key, setting_value FROM settings")
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

        Ok(rows
            .into_iter()
            .map(|row| (row.setting_key, row.setting_value))
            .collect())
    }

    /// Upserts every pair in one transaction.
    #[instrument(skip(db, dto), fields(db.operation = "UPSERT", db.table = "settings", keys = dto.0.len()))]
    pub async fn update_settings(db: &PgPool, dto: &UpdateSettingsDto) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        for (key, value) in &dto.0 {
            sqlx::query(
                r#"INSERT INTO settings (setting_key, setting_value)
                   VALUES ($1, $2)
                   ON CONFLICT (setting_key) DO UPDATE SET setting_value = EXCLUDED.setting_value"#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, setting.key = %key, "Failed to upsert setting");
                AppError::database(e)
            })?;
        }

        tx.commit().await.map_err(AppError::database)?;
        Ok(())
    }
}
