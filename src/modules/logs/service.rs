use sqlx::PgPool;
use tracing::{error, instrument};

use bangbang_core::AppError;

use crate::modules::logs::model::{AuditLogEntry, LogFilterParams, LogsResponse};

pub struct LogService;

impl LogService {
    /// Newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "admin_logs"))]
    pub async fn list_logs(db: &PgPool, filters: &LogFilterParams) -> Result<LogsResponse, AppError> {
        let limit = filters.limit();
        let offset = filters.offset();
        let action_pattern = filters.action_pattern();

        let mut conditions: Vec<String> = Vec::new();
        let mut param_count = 0;
        if filters.user_id.is_some() {
            param_count += 1;
            conditions.push(format!("user_id = ${}", param_count));
        }
        if action_pattern.is_some() {
            param_count += 1;
            conditions.push(format!("action LIKE ${}", param_count));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM admin_logs{}", where_clause);
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(user_id) = filters.user_id {
            count_sql = count_sql.bind(user_id);
        }
        if let Some(pattern) = &action_pattern {
            count_sql = count_sql.bind(pattern);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Failed to count audit log entries");
            AppError::database(e)
        })?;

        let data_query = format!(
            r#"SELECT id, user_id, user_name, user_role, action, target_type, target_id,
                      details, ip_address, created_at
               FROM admin_logs{}
               ORDER BY created_at DESC, id DESC
               LIMIT {} OFFSET {}"#,
            where_clause, limit, offset
        );
        let mut data_sql = sqlx::query_as::<_, AuditLogEntry>(&data_query);
        if let Some(user_id) = filters.user_id {
            data_sql = data_sql.bind(user_id);
        }
        if let Some(pattern) = &action_pattern {
            data_sql = data_sql.bind(pattern);
        }
        let logs = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Failed to fetch audit log entries");
            AppError::database(e)
        })?;

        Ok(LogsResponse {
            logs,
            total,
            limit,
            offset,
        })
    }
}
