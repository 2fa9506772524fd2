//! Back-office flows against a real database. Run with
//! `cargo test -- --ignored` and `DATABASE_URL` pointing at a scratch server.

mod common;

use axum::http::StatusCode;
use bangbang::bangbang_auth::Role;
use common::{
    body_json, create_test_category, create_test_product, create_test_user, empty_request,
    json_request, send, test_app, token_for,
};
use serde_json::json;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct LogRow {
    user_id: i64,
    user_role: String,
    action: String,
    target_type: String,
    target_id: Option<i64>,
    details: serde_json::Value,
    ip_address: String,
}

async fn latest_log(pool: &PgPool) -> LogRow {
    sqlx::query_as::<_, LogRow>(
        "SELECT user_id, user_role, action, target_type, target_id, details, ip_address
         FROM admin_logs ORDER BY id DESC LIMIT 1",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn log_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM admin_logs")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_superadmin_creates_admin_and_is_audited(pool: PgPool) {
    let superadmin = create_test_user(&pool, Role::Superadmin, "secret123").await;
    let token = token_for(&superadmin);

    let mut request = json_request(
        "POST",
        "/api/admin/users",
        Some(&token),
        json!({
            "name": "Shop Admin",
            "email": "shop-admin@bangbang.test",
            "password": "secret123",
            "role": "admin"
        }),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());

    let response = send(test_app(pool.clone()), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());

    let log = latest_log(&pool).await;
    assert_eq!(log.user_id, superadmin.id);
    assert_eq!(log.user_role, "superadmin");
    assert_eq!(log.action, "create_user");
    assert_eq!(log.target_type, "user");
    assert_eq!(log.target_id, body["user"]["id"].as_i64());
    assert_eq!(log.details["role"], "admin");
    assert_eq!(log.details["email"], "shop-admin@bangbang.test");
    assert_eq!(log.ip_address, "203.0.113.9");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let superadmin = create_test_user(&pool, Role::Superadmin, "secret123").await;
    let token = token_for(&superadmin);

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/admin/users",
            Some(&token),
            json!({
                "name": "Clash",
                "email": superadmin.email,
                "password": "secret123",
                "role": "staff"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(log_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_forbidden_request_writes_no_audit_row(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, "secret123").await;
    let staff = create_test_user(&pool, Role::Staff, "secret123").await;

    let response = send(
        test_app(pool.clone()),
        empty_request(
            "DELETE",
            &format!("/api/admin/users/{}", staff.id),
            Some(&token_for(&admin)),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(log_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_update_and_delete(pool: PgPool) {
    let superadmin = create_test_user(&pool, Role::Superadmin, "secret123").await;
    let staff = create_test_user(&pool, Role::Staff, "secret123").await;
    let token = token_for(&superadmin);

    let response = send(
        test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/admin/users/{}", staff.id),
            Some(&token),
            json!({"role": "admin"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "admin");

    let log = latest_log(&pool).await;
    assert_eq!(log.action, "update_user");
    assert_eq!(log.details, json!({"role": "admin"}));

    let response = send(
        test_app(pool.clone()),
        empty_request(
            "DELETE",
            &format!("/api/admin/users/{}", staff.id),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let log = latest_log(&pool).await;
    assert_eq!(log.action, "delete_user");
    assert_eq!(log.details["deleted_email"], staff.email.as_str());

    let response = send(
        test_app(pool.clone()),
        empty_request(
            "DELETE",
            &format!("/api/admin/users/{}", staff.id),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_update_null_phone_clears_it(pool: PgPool) {
    let superadmin = create_test_user(&pool, Role::Superadmin, "secret123").await;
    let staff = create_test_user(&pool, Role::Staff, "secret123").await;

    let response = send(
        test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/admin/users/{}", staff.id),
            Some(&token_for(&superadmin)),
            json!({"phone": null}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["phone"], serde_json::Value::Null);
    assert_eq!(body["user"]["role"], "staff");

    let log = latest_log(&pool).await;
    assert_eq!(log.details, json!({"phone": null}));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_register_login_and_me(pool: PgPool) {
    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "name": "สมชาย ใจดี",
                "email": "somchai@bangbang.test",
                "password": "password123",
                "phone": "0891234567"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "customer");

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "somchai@bangbang.test", "password": "wrong-password"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"email": "somchai@bangbang.test", "password": "password123"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = send(
        test_app(pool.clone()),
        empty_request("GET", "/api/auth/me", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "somchai@bangbang.test");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_checkout_prices_from_catalog_and_tracks_by_phone(pool: PgPool) {
    let category = create_test_category(&pool, "croissant").await;
    let croissant = create_test_product(&pool, "Butter Croissant", "65.00", Some(category), true).await;

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/orders",
            None,
            json!({
                "customer_name": "Ploy",
                "phone": "0812345678",
                "address": "Bangkok",
                "total": "1.00",
                "items": [{"product_id": croissant, "quantity": 2, "price": "0.01"}]
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let order_id = body["order"]["id"].as_i64().unwrap();
    assert_eq!(body["order"]["total"], "130.00");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["items"][0]["price"], "65.00");

    let response = send(
        test_app(pool.clone()),
        empty_request("GET", "/api/orders?phone=0812345678", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);

    let response = send(
        test_app(pool.clone()),
        empty_request(
            "GET",
            &format!("/api/orders/{}?phone=0899999999", order_id),
            None,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_checkout_rejects_out_of_stock_product(pool: PgPool) {
    let sold_out = create_test_product(&pool, "Matcha Roll", "280.00", None, false).await;

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/orders",
            None,
            json!({
                "customer_name": "Ploy",
                "phone": "0812345678",
                "address": "Bangkok",
                "items": [{"product_id": sold_out, "quantity": 1}]
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_staff_updates_order_status(pool: PgPool) {
    let staff = create_test_user(&pool, Role::Staff, "secret123").await;
    let bun = create_test_product(&pool, "Anpan", "45.00", None, true).await;

    let response = send(
        test_app(pool.clone()),
        json_request(
            "POST",
            "/api/orders",
            None,
            json!({
                "customer_name": "Ploy",
                "phone": "0812345678",
                "address": "Bangkok",
                "items": [{"product_id": bun, "quantity": 1}]
            }),
        ),
    )
    .await;
    let order_id = body_json(response).await["order"]["id"].as_i64().unwrap();

    let response = send(
        test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/orders/{}", order_id),
            Some(&token_for(&staff)),
            json!({"status": "paid"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["order"]["status"], "paid");

    let log = latest_log(&pool).await;
    assert_eq!(log.action, "update_order_status");
    assert_eq!(log.target_type, "order");
    assert_eq!(log.details, json!({"status": "paid", "previous_status": "pending"}));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_settings_update_and_logs_listing(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, "secret123").await;
    let token = token_for(&admin);

    let response = send(
        test_app(pool.clone()),
        json_request(
            "PUT",
            "/api/settings",
            Some(&token),
            json!({"shop_name": "ปังๆ", "shop_line": "@bangbang"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["settings"]["shop_name"], "ปังๆ");

    let response = send(
        test_app(pool.clone()),
        empty_request("GET", "/api/admin/logs?action=update_&limit=10", Some(&token)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["logs"][0]["action"], "update_settings");
    assert_eq!(body["logs"][0]["target_id"], serde_json::Value::Null);
}
