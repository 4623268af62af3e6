use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use marketflow::{
    config::AppConfig,
    models::{plan::TripPlan, settings::IntakeDefaults},
    routes::create_router,
    services::storage::{PlanStore, StorageService},
    state::AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    storage: StorageService,
    _root: TempDir,
}

fn test_app() -> TestApp {
    let root = TempDir::new().expect("temp dir");
    let data_root = root.path().join("data");
    let config = AppConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        data_root: data_root.clone(),
        intake: IntakeDefaults::default(),
    };
    let storage = StorageService::new(data_root);
    let state = AppState::new(config, Arc::new(storage.clone()));
    TestApp {
        router: create_router(state),
        storage,
        _root: root,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    (status, body.to_vec())
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

const EVENING_TRIP: &str = r#"{
    "currentTime": "16:00",
    "totalFreeTimeMinutes": 120,
    "travelTimeToMarketMinutes": 15,
    "travelTimeFromMarketMinutes": 20,
    "essentialItems": [
        {"name": "Milk", "estimatedMinutes": 10},
        {"name": "Eggs", "estimatedMinutes": 15}
    ],
    "optionalItems": [
        {"name": "Avocados", "estimatedMinutes": 5},
        {"name": "Sourdough", "estimatedMinutes": 5}
    ],
    "averageCheckoutMinutes": 10,
    "peakTrafficWindows": [{"start": "17:00", "end": "18:30"}]
}"#;

#[tokio::test]
async fn planning_a_trip_stores_it() {
    let app = test_app();
    let (status, body) = send(&app.router, json_post("/trips", EVENING_TRIP)).await;
    assert_eq!(status, StatusCode::OK);

    let plan: TripPlan = serde_json::from_slice(&body).expect("plan json");
    assert_eq!(plan.summary.efficiency_score, 85);
    assert_eq!(plan.alerts.len(), 1);

    let stored = app.storage.load_plan().await.expect("load").expect("stored plan");
    assert_eq!(stored, plan);
}

#[tokio::test]
async fn first_visit_plans_the_sample_trip() {
    let app = test_app();
    assert!(app.storage.load_plan().await.expect("load").is_none());

    let request = Request::get("/trips/current")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);

    let plan: TripPlan = serde_json::from_slice(&body).expect("plan json");
    let names: Vec<&str> = plan
        .shopping_list
        .high_priority
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["Organic Whole Milk", "Free-range Eggs (12pk)"]);
    assert!(app.storage.load_plan().await.expect("load").is_some());
}

#[tokio::test]
async fn toggling_flips_and_persists_status() {
    let app = test_app();
    send(&app.router, json_post("/trips", EVENING_TRIP)).await;

    let toggle = r#"{"tier": "generalItems", "name": "Sourdough"}"#;
    let (status, body) = send(&app.router, json_post("/trips/current/toggle", toggle)).await;
    assert_eq!(status, StatusCode::OK);
    let plan: TripPlan = serde_json::from_slice(&body).expect("plan json");
    assert!(plan.shopping_list.general_items[1].status);
    assert!(!plan.shopping_list.general_items[0].status);

    let stored = app.storage.load_plan().await.expect("load").expect("stored plan");
    assert!(stored.shopping_list.general_items[1].status);

    send(&app.router, json_post("/trips/current/toggle", toggle)).await;
    let stored = app.storage.load_plan().await.expect("load").expect("stored plan");
    assert!(!stored.shopping_list.general_items[1].status);
}

#[tokio::test]
async fn concurrent_toggles_both_persist() {
    let app = test_app();
    send(&app.router, json_post("/trips", EVENING_TRIP)).await;

    let milk = json_post(
        "/trips/current/toggle",
        r#"{"tier": "highPriority", "name": "Milk"}"#,
    );
    let eggs = json_post(
        "/trips/current/toggle",
        r#"{"tier": "highPriority", "name": "Eggs"}"#,
    );
    let (first, second) = tokio::join!(send(&app.router, milk), send(&app.router, eggs));
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);

    let stored = app.storage.load_plan().await.expect("load").expect("stored plan");
    assert!(stored
        .shopping_list
        .high_priority
        .iter()
        .all(|entry| entry.status));
}

#[tokio::test]
async fn toggling_an_unknown_item_is_not_found() {
    let app = test_app();
    send(&app.router, json_post("/trips", EVENING_TRIP)).await;

    let toggle = r#"{"tier": "highPriority", "name": "Caviar"}"#;
    let (status, _) = send(&app.router, json_post("/trips/current/toggle", toggle)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn form_submission_uses_intake_defaults() {
    let app = test_app();
    let request = Request::post("/trips/form")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "currentTime=16%3A00&totalFreeTimeMinutes=120&travelTimeMinutes=\
             &essentialItems=Milk%2C+Eggs&optionalItems=Avocados",
        ))
        .expect("request");
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);

    let plan: TripPlan = serde_json::from_slice(&body).expect("plan json");
    assert_eq!(plan.steps[0].description, "Commute to market (15 mins)");
    // 15 + 20 travel, 10 checkout, 20 essentials, 5 optional
    assert_eq!(plan.summary.estimated_total_time, "1h 10m");
    assert_eq!(plan.alerts.len(), 1);
}

#[tokio::test]
async fn blank_item_names_are_a_bad_request() {
    let app = test_app();
    let body = r#"{
        "currentTime": "09:00",
        "totalFreeTimeMinutes": 60,
        "travelTimeToMarketMinutes": 5,
        "travelTimeFromMarketMinutes": 5,
        "essentialItems": [{"name": " ", "estimatedMinutes": 5}]
    }"#;
    let (status, _) = send(&app.router, json_post("/trips", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.storage.load_plan().await.expect("load").is_none());
}

#[tokio::test]
async fn corrupt_stored_plan_is_a_server_error() {
    let app = test_app();
    app.storage.ensure_structure().await.expect("data dir");
    tokio::fs::write(app.storage.plan_path(), b"{\"steps\": [")
        .await
        .expect("write plan file");

    let request = Request::get("/trips/current")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
