//! HTTP-level integration tests for the SKU list and detail endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::{body_json, create_sku, create_user, get, get_auth, get_with_cookie};
use merch_db::models::daily_metric::NewDailyMetric;
use merch_db::repositories::{DailyMetricRepo, NoteRepo};
use sqlx::PgPool;

fn names(json: &serde_json::Value) -> Vec<String> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/skus/").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_accepts_cookie_token(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "A", "Alpha", 1.0, 7.0).await;
    let app = common::build_test_app(pool);

    let response = get_with_cookie(app, "/api/skus/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn high_return_rate_filter_sorted_by_name(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "Z-1", "Zulu", 9.0, 7.0).await;
    create_sku(&pool, "A-1", "Alpha", 12.5, 7.0).await;
    create_sku(&pool, "M-1", "Mike", 5.0, 7.0).await;
    create_sku(&pool, "B-1", "Bravo", 1.0, 7.0).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/skus/?filter_type=high_return_rate", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(names(&json), vec!["Alpha", "Zulu"]);
    for sku in json["results"].as_array().unwrap() {
        assert!(sku["return_percentage"].as_f64().unwrap() > 5.0);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn low_content_score_filter_and_search(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "S-1", "Blue Shirt", 0.0, 4.0).await;
    create_sku(&pool, "S-2", "Red Shirt", 0.0, 8.0).await;
    create_sku(&pool, "P-1", "Blue Pants", 0.0, 3.0).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/skus/?filter_type=LOW_CONTENT_SCORE&search=shirt",
        &token,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(names(&json), vec!["Blue Shirt"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_item_shape(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "ABC-1", "Shirt", 2.5, 7.5).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/skus/", &token).await).await;

    assert_eq!(
        json["results"][0],
        serde_json::json!({
            "sku_id": "ABC-1",
            "name": "Shirt",
            "sales": 100,
            "return_percentage": 2.5,
            "content_score": 7.5,
        })
    );
    assert!(json["next"].is_null());
    assert!(json["previous"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn descending_ordering(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "A", "Alpha", 1.0, 7.0).await;
    create_sku(&pool, "B", "Bravo", 3.0, 7.0).await;
    create_sku(&pool, "C", "Charlie", 2.0, 7.0).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/skus/?ordering=-return_percentage", &token).await).await;
    assert_eq!(names(&json), vec!["Bravo", "Charlie", "Alpha"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pagination_defaults_clamp_and_bounds(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    for i in 0..30 {
        create_sku(&pool, &format!("SKU-{i:02}"), &format!("Item {i:02}"), 0.0, 7.0).await;
    }
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app.clone(), "/api/skus/", &token).await).await;
    assert_eq!(json["count"], 30);
    assert_eq!(json["results"].as_array().unwrap().len(), 10);
    assert_eq!(json["next"], 2);
    assert!(json["previous"].is_null());

    let json = body_json(get_auth(app.clone(), "/api/skus/?page_size=100", &token).await).await;
    assert_eq!(json["results"].as_array().unwrap().len(), 25);

    let json = body_json(
        get_auth(app.clone(), "/api/skus/?page=2&page_size=25", &token).await,
    )
    .await;
    assert_eq!(json["results"].as_array().unwrap().len(), 5);
    assert_eq!(json["previous"], 1);
    assert!(json["next"].is_null());

    let response = get_auth(app.clone(), "/api/skus/?page=4", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app, "/api/skus/?page=0", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_catalog_first_page_is_valid(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/skus/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_filter_or_ordering_is_validation_error(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/skus/?filter_type=bestsellers", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get_auth(app, "/api/skus/?ordering=created_at", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_query_string_gets_json_error(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/skus/?page=1&page=2", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("page"));
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_series_is_gap_filled(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let sku = create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    let today = Utc::now().date_naive();
    let three_ago = today.checked_sub_days(Days::new(3)).unwrap();
    for (date, units) in [(today, 5), (three_ago, 2)] {
        DailyMetricRepo::create(
            &pool,
            &NewDailyMetric {
                sku_pk: sku.id,
                date,
                sales_units: units,
                returns_units: 0,
            },
        )
        .await
        .unwrap();
    }
    let mut config = common::test_config();
    config.metrics_window_days = 7;
    let app = common::build_test_app_with(pool, config);

    let response = get_auth(app, "/api/skus/ABC-1/", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let series = json["daily_metrics"].as_array().unwrap();
    assert_eq!(series.len(), 8);
    assert_eq!(
        series[0]["date"],
        today.checked_sub_days(Days::new(7)).unwrap().to_string()
    );
    assert_eq!(series[7]["date"], today.to_string());
    let units: Vec<i64> = series
        .iter()
        .map(|p| p["sales_units"].as_i64().unwrap())
        .collect();
    assert_eq!(units, vec![0, 0, 0, 0, 2, 0, 0, 5]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_without_metrics_has_full_zero_series(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/skus/ABC-1/", &token).await).await;

    let series = json["daily_metrics"].as_array().unwrap();
    assert_eq!(series.len(), 61);
    assert!(series.iter().all(|p| p["sales_units"] == 0));
    assert_eq!(json["sku_id"], "ABC-1");
    assert_eq!(json["name"], "Shirt");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_unknown_sku_is_404(pool: PgPool) {
    let (_, token) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/skus/NOPE/", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_notes_follow_role_visibility(pool: PgPool) {
    let (u1, t1) = create_user(&pool, "brand1", &["brand_user"], false).await;
    let (u2, _) = create_user(&pool, "brand2", &["brand_user"], false).await;
    let (_, ops) = create_user(&pool, "ops", &["merch_ops"], false).await;
    let (_, staff) = create_user(&pool, "staff", &[], true).await;
    let (_, nobody) = create_user(&pool, "nobody", &[], false).await;
    let sku = create_sku(&pool, "ABC-1", "Shirt", 0.0, 7.0).await;
    NoteRepo::create(&pool, sku.id, Some(u1.id), "n1").await.unwrap();
    NoteRepo::create(&pool, sku.id, Some(u2.id), "n2").await.unwrap();
    let app = common::build_test_app(pool);

    let texts = |json: serde_json::Value| -> Vec<String> {
        json["notes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["text"].as_str().unwrap().to_string())
            .collect()
    };

    let own = body_json(get_auth(app.clone(), "/api/skus/ABC-1/", &t1).await).await;
    assert_eq!(own["notes"][0]["sku"], "ABC-1");
    assert_eq!(own["notes"][0]["created_by"], u1.id);
    assert_eq!(texts(own), vec!["n1"]);

    let all = body_json(get_auth(app.clone(), "/api/skus/ABC-1/", &ops).await).await;
    assert_eq!(texts(all), vec!["n2", "n1"]);

    let all = body_json(get_auth(app.clone(), "/api/skus/ABC-1/", &staff).await).await;
    assert_eq!(texts(all).len(), 2);

    let none = body_json(get_auth(app, "/api/skus/ABC-1/", &nobody).await).await;
    assert!(texts(none).is_empty());
}
