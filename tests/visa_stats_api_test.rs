use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

async fn test_state() -> visa_stats_backend::AppState {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    visa_stats_backend::AppState::new(pool)
}

fn app(state: visa_stats_backend::AppState) -> Router {
    Router::new()
        .route("/health", get(visa_stats_backend::routes::health::health))
        .route(
            "/api/visa-stats",
            get(visa_stats_backend::routes::visa_stats::list_stats)
                .post(visa_stats_backend::routes::visa_stats::submit_stat),
        )
        .route(
            "/api/visa-stats/summary",
            get(visa_stats_backend::routes::visa_stats::summary_stats),
        )
        .route(
            "/api/export",
            get(visa_stats_backend::routes::export::export_stats),
        )
        .with_state(state)
}

fn submission(application: &str, issue: &str, city: &str) -> JsonValue {
    json!({
        "city": city,
        "visa_application_date": application,
        "visa_issue_date": issue,
        "travel_purpose": "туризм",
        "planned_travel_date": "",
        "additional_doc_request": false,
        "tickets_purchased": true,
        "hotels_purchased": false,
        "employment_certificate": "ИП",
        "financial_guarantee": 1500.0,
        "comments": "",
        "visa_center": "VMS",
        "visa_status": "1",
        "visa_issued_for_days": 90,
        "corridor_days": null,
        "past_visas_trips": "",
        "consul": "",
        "planned_stay_in_country": "2 недели"
    })
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn visa_stats_flow_end_to_end() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("COUNTRY_LABEL", "italy");

    visa_stats_backend::config::init_config().expect("init config");
    let state = test_state().await;
    let app = app(state);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);

    // Ten days between application and issue.
    let (status, stat) = post_json(
        &app,
        "/api/visa-stats",
        submission("2024-01-01", "2024-01-11", "Москва"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stat["id"], 1);
    assert_eq!(stat["waiting_days"], 10);
    assert_eq!(stat["visa_application_date"], "2024-01-01");

    // Issue before application: stored negative, not rejected.
    let (status, stat) = post_json(
        &app,
        "/api/visa-stats",
        submission("2024-02-11", "2024-02-01", "Казань"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stat["waiting_days"], -10);

    // An unparseable date is a 400, never a silent success.
    let (status, body) = post_json(
        &app,
        "/api/visa-stats",
        submission("someday", "2024-02-01", "Москва"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("visa_application_date"));

    let (status, listed) = get_json(&app, "/api/visa-stats").await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().expect("array");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["city"], "Москва");
    assert_eq!(listed[1]["city"], "Казань");

    // City filter plus an empty visa-center filter restricts by city only.
    let (status, summary) = get_json(
        &app,
        "/api/visa-stats/summary?city=%D0%9C%D0%BE%D1%81%D0%BA%D0%B2%D0%B0&visa_center=",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["summary"]["mean"], 10.0);
    assert_eq!(summary["summary"]["max"], 10);
    assert_eq!(summary["summary"]["min"], 10);
    assert_eq!(summary["summary"]["last_ten"], json!([10]));
    let series = summary["series"].as_array().expect("series");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["date"], "2024-01-01");
    assert_eq!(series[0]["average_waiting_days"], 10.0);

    // Unfiltered summary covers both records.
    let (status, summary) = get_json(&app, "/api/visa-stats/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["summary"]["min"], -10);
    assert_eq!(summary["summary"]["max"], 10);

    // Export answers with the XLSX content type and a dated filename.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/export")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("content type")
        .to_str()
        .expect("utf8");
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .expect("disposition")
        .to_str()
        .expect("utf8");
    assert!(disposition.starts_with("attachment; filename=\"visa_stats_italy_"));
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert!(bytes.starts_with(b"PK"));
}
