//! HTTP-level integration tests for staff-only SKU maintenance.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_sku, create_user, post_auth, post_json_auth};
use merch_db::repositories::SkuRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_staff_is_forbidden(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/admin/skus/",
        &token,
        json!({"sku_id": "NEW-1", "name": "New"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(SkuRepo::find_by_sku_id(&pool, "NEW-1").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_sku_derives_return_percentage(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/skus/",
        &token,
        json!({
            "sku_id": "NEW-1",
            "name": "New",
            "sales": 200,
            "returns": 15,
            "content_score": 6.5,
            "return_percentage": 99.0,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["sku_id"], "NEW-1");
    assert_eq!(json["sales"], 200);
    assert_eq!(json["return_percentage"], 7.5);
    assert_eq!(json["content_score"], 6.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_sku_with_zero_sales_has_zero_percentage(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/skus/",
        &token,
        json!({"sku_id": "NEW-1", "name": "New", "returns": 3}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["return_percentage"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_sku_id_is_conflict(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/skus/",
        &token,
        json!({"sku_id": "ABC-1", "name": "Other"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "A SKU with this sku_id already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_sku_fields_are_rejected(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    let app = common::build_test_app(pool);

    for body in [
        json!({"sku_id": "", "name": "Blank id"}),
        json!({"sku_id": "X-1", "name": "   "}),
        json!({"sku_id": "X-1", "name": "Neg", "sales": -1}),
        json!({"sku_id": "x".repeat(101), "name": "Long id"}),
    ] {
        let response = post_json_auth(app.clone(), "/api/admin/skus/", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_metric_recorded_once_per_day(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    let app = common::build_test_app(pool);
    let uri = "/api/admin/skus/ABC-1/daily-metrics/";
    let body = json!({"date": "2024-03-01", "sales_units": 12, "returns_units": 1});

    let response = post_json_auth(app.clone(), uri, &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["date"], "2024-03-01");
    assert_eq!(json["sales_units"], 12);
    assert_eq!(json["returns_units"], 1);

    let response = post_json_auth(app, uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_metric_validation_and_missing_sku(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/admin/skus/ABC-1/daily-metrics/",
        &token,
        json!({"date": "2024-03-01", "sales_units": -4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/admin/skus/NOPE/daily-metrics/",
        &token,
        json!({"date": "2024-03-01", "sales_units": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_sets_aggregates_from_history(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    create_sku(&pool, "ABC-1", "Shirt", 42.0, 7.0).await;
    let app = common::build_test_app(pool);
    let metrics_uri = "/api/admin/skus/ABC-1/daily-metrics/";

    for (date, sales, returns) in [("2024-03-01", 30, 2), ("2024-03-02", 10, 2)] {
        let response = post_json_auth(
            app.clone(),
            metrics_uri,
            &token,
            json!({"date": date, "sales_units": sales, "returns_units": returns}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = post_auth(app, "/api/admin/skus/ABC-1/recompute/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sales"], 40);
    assert_eq!(json["return_percentage"], 10.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recompute_without_history_zeroes_counters(pool: PgPool) {
    let (_, token) = create_user(&pool, "staff", &[], true).await;
    create_sku(&pool, "ABC-1", "Shirt", 42.0, 7.0).await;
    let app = common::build_test_app(pool);

    let response = post_auth(app, "/api/admin/skus/ABC-1/recompute/", &token).await;

    let json = body_json(response).await;
    assert_eq!(json["sales"], 0);
    assert_eq!(json["return_percentage"], 0.0);
}
