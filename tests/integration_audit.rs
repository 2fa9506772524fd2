mod common;

use axum::http::HeaderMap;
use bangbang::bangbang_auth::Role;
use bangbang::utils::audit::{AuditAction, AuditLogger, AuditOutcome, AuditTarget};
use common::{create_test_user, identity, unreachable_pool};
use serde_json::json;
use sqlx::PgPool;

#[tokio::test]
async fn test_record_swallows_storage_failure() {
    let pool = unreachable_pool();
    let actor = identity(1, Role::Superadmin);

    let outcome = AuditLogger::record(
        &pool,
        &actor,
        AuditAction::CreateUser,
        AuditTarget::User,
        Some(42),
        json!({"name": "New Staff", "role": "staff"}),
        &HeaderMap::new(),
    )
    .await;

    assert_eq!(outcome, AuditOutcome::Dropped);
    assert!(!outcome.is_written());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_record_writes_row_with_actor_snapshot(pool: PgPool) {
    let actor = create_test_user(&pool, Role::Staff, "secret123").await;
    let mut headers = HeaderMap::new();
    headers.insert("x-real-ip", "198.51.100.7".parse().unwrap());

    let outcome = AuditLogger::record(
        &pool,
        &actor,
        AuditAction::DeleteProduct,
        AuditTarget::Product,
        Some(3),
        json!("Melon Pan"),
        &headers,
    )
    .await;

    let AuditOutcome::Written { id } = outcome else {
        panic!("expected the entry to be written");
    };

    let (user_name, user_role, details, ip_address): (String, String, serde_json::Value, String) =
        sqlx::query_as(
            "SELECT user_name, user_role, details, ip_address FROM admin_logs WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(user_name, actor.name);
    assert_eq!(user_role, "staff");
    assert_eq!(details, json!({"value": "Melon Pan"}));
    assert_eq!(ip_address, "198.51.100.7");
}
