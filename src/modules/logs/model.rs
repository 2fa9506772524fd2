use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use bangbang_core::pagination::{PaginationParams, deserialize_optional_i64};

pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 200;

/// One recorded back-office action. Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_role: String,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<i64>,
    #[schema(value_type = Object)]
    pub details: Value,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogFilterParams {
    /// Action prefix, e.g. `update` matches `update_product` and `update_settings`
    pub action: Option<String>,
    /// Actor id
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub user_id: Option<i64>,
    /// Default 50, at most 200
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub offset: Option<i64>,
}

impl LogFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn limit(&self) -> i64 {
        self.pagination().limit_or(DEFAULT_LOG_LIMIT, MAX_LOG_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.pagination().offset()
    }

    /// `LIKE` pattern matching actions that start with the filter verbatim.
    pub fn action_pattern(&self) -> Option<String> {
        self.action
            .as_deref()
            .map(str::trim)
            .filter(|action| !action.is_empty())
            .map(|action| {
                let escaped = action
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("{}%", escaped)
            })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogsResponse {
    pub logs: Vec<AuditLogEntry>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> LogFilterParams {
        serde_json::from_str(query).unwrap()
    }

    #[test]
    fn test_limit_defaults_and_caps() {
        let defaults = LogFilterParams::default();
        assert_eq!(defaults.limit(), 50);
        assert_eq!(defaults.offset(), 0);

        assert_eq!(params(r#"{"limit":"500"}"#).limit(), 200);
        assert_eq!(params(r#"{"limit":"20","offset":"40"}"#).offset(), 40);
    }

    #[test]
    fn test_action_pattern_is_an_escaped_prefix() {
        assert_eq!(
            params(r#"{"action":"update"}"#).action_pattern().as_deref(),
            Some("update%")
        );
        assert_eq!(
            params(r#"{"action":"create_user"}"#).action_pattern().as_deref(),
            Some("create\\_user%")
        );
        assert_eq!(params(r#"{"action":"  "}"#).action_pattern(), None);
        assert_eq!(LogFilterParams::default().action_pattern(), None);
    }

    #[test]
    fn test_user_id_accepts_empty_value() {
        assert_eq!(params(r#"{"user_id":""}"#).user_id, None);
        assert_eq!(params(r#"{"user_id":"3"}"#).user_id, Some(3));
    }
}
