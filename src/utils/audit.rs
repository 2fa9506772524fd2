//! Audit trail for back-office mutations.
//!
//! Every mutating admin handler calls [`AuditLogger::record`] after its own
//! write has committed and before it responds. Recording is best effort: a
//! failed insert is logged and reported as [`AuditOutcome::Dropped`], never
//! propagated to the request.

use std::fmt;

use axum::http::HeaderMap;
use serde_json::{Map, Value};
use sqlx::{PgPool, types::Json};
use tracing::{error, instrument};

use bangbang_auth::Identity;

use crate::utils::client_ip::client_ip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    UpdateOrderStatus,
    UpdateSettings,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl AuditAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            AuditAction::CreateProduct => "create_product",
            AuditAction::UpdateProduct => "update_product",
            AuditAction::DeleteProduct => "delete_product",
            AuditAction::UpdateOrderStatus => "update_order_status",
            AuditAction::UpdateSettings => "update_settings",
            AuditAction::CreateUser => "create_user",
            AuditAction::UpdateUser => "update_user",
            AuditAction::DeleteUser => "delete_user",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTarget {
    Product,
    Order,
    Settings,
    User,
}

impl AuditTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            AuditTarget::Product => "product",
            AuditTarget::Order => "order",
            AuditTarget::Settings => "settings",
            AuditTarget::User => "user",
        }
    }
}

impl fmt::Display for AuditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a recording attempt. Callers may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    Written { id: i64 },
    Dropped,
}

impl AuditOutcome {
    pub fn is_written(self) -> bool {
        matches!(self, AuditOutcome::Written { .. })
    }
}

/// Details are always stored as a JSON object; anything else is wrapped.
fn details_object(details: Value) -> Map<String, Value> {
    match details {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

pub struct AuditLogger;

impl AuditLogger {
    #[instrument(
        skip(db, actor, details, headers),
        fields(
            db.operation = "INSERT",
            db.table = "admin_logs",
            audit.action = %action,
            audit.actor_id = actor.id
        )
    )]
    pub async fn record(
        db: &PgPool,
        actor: &Identity,
        action: AuditAction,
        target: AuditTarget,
        target_id: Option<i64>,
        details: Value,
        headers: &HeaderMap,
    ) -> AuditOutcome {
        let ip_address = client_ip(headers);
        let details = details_object(details);

        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO admin_logs
                (user_id, user_name, user_role, action, target_type, target_id, details, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(actor.id)
        .bind(&actor.name)
        .bind(actor.role.as_str())
        .bind(action.as_str())
        .bind(target.as_str())
        .bind(target_id)
        .bind(Json(details))
        .bind(&ip_address)
        .fetch_one(db)
        .await;

        match result {
            Ok(id) => AuditOutcome::Written { id },
            Err(e) => {
                error!(
                    error = %e,
                    action = %action,
                    target_type = %target,
                    target_id = ?target_id,
                    actor_id = actor.id,
                    "Failed to write audit log entry"
                );
                AuditOutcome::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_vocabulary() {
        assert_eq!(AuditAction::CreateProduct.as_str(), "create_product");
        assert_eq!(AuditAction::UpdateOrderStatus.as_str(), "update_order_status");
        assert_eq!(AuditAction::DeleteUser.to_string(), "delete_user");
    }

    #[test]
    fn test_target_vocabulary() {
        assert_eq!(AuditTarget::Settings.as_str(), "settings");
        assert_eq!(AuditTarget::User.to_string(), "user");
    }

    #[test]
    fn test_details_object_keeps_objects() {
        let map = details_object(json!({"status": "paid"}));
        assert_eq!(map.get("status"), Some(&json!("paid")));
    }

    #[test]
    fn test_details_object_wraps_scalars_and_null() {
        assert!(details_object(Value::Null).is_empty());
        let map = details_object(json!("note"));
        assert_eq!(map.get("value"), Some(&json!("note")));
    }
}
