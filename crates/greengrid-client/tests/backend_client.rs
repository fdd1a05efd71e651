//! ---
//! gg_section: "02-backend-client"
//! gg_subsection: "integration-test"
//! gg_type: "source"
//! gg_scope: "test"
//! gg_description: "Round-trip tests for the backend client against a mock service."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use std::time::Duration;

use axum::extract::Json as ExtractJson;
use axum::routing::{get, post};
use axum::{Json, Router};
use greengrid_client::{BackendClient, RiskTier, SimulationParameters};
use serde_json::{json, Value};
use url::Url;

/// Bind a throwaway backend on an ephemeral port and return its base url.
async fn spawn_backend(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Url::parse(&format!("http://{addr}/")).expect("backend url")
}

fn client_for(base: Url) -> BackendClient {
    BackendClient::new(base, Duration::from_secs(2)).expect("build client")
}

fn mock_router() -> Router {
    Router::new()
        .route(
            "/data",
            get(|| async {
                Json(json!({
                    "data": [
                        { "hour": 0, "load_kw": 120.0 },
                        { "hour": 1, "load_kw": 135.5 }
                    ]
                }))
            }),
        )
        .route(
            "/predict",
            post(|ExtractJson(body): ExtractJson<Value>| async move {
                // Echo a component derived from the request so the test can
                // prove the snapshot arrived intact.
                let ev_count = body["ev_count"].as_f64().unwrap_or(0.0);
                Json(json!({
                    "predicted_load": 150.0,
                    "risk": "LOW",
                    "components": { "ev_charging": ev_count * 25.0 }
                }))
            }),
        )
        .route(
            "/recommendation",
            post(|| async { Json(json!({ "recommendation": "Usage is optimal." })) }),
        )
        .route(
            "/forecast",
            post(|| async {
                Json(json!([
                    { "hour_offset": 0, "time_of_day": 18, "predicted_load": 150.0, "risk": "LOW" },
                    { "hour_offset": 1, "time_of_day": 19, "predicted_load": 210.0, "risk": "MEDIUM" },
                    { "hour_offset": 2, "time_of_day": 20, "predicted_load": 280.0, "risk": "HIGH" },
                    { "hour_offset": 3, "time_of_day": 21, "predicted_load": 190.0, "risk": "LOW" }
                ]))
            }),
        )
        .route(
            "/notify",
            post(|ExtractJson(body): ExtractJson<Value>| async move {
                let homes = body["params"]["community_size"].as_u64().unwrap_or(100);
                Json(json!({
                    "status": "sent",
                    "risk": body["risk"],
                    "predicted_load": body["predicted_load"],
                    "notified_customers": (homes as f64 * 0.8) as u64,
                    "timestamp": "2026-01-01T00:00:00Z"
                }))
            }),
        )
}

#[tokio::test]
async fn fetches_history_prediction_and_recommendation() {
    let base = spawn_backend(mock_router()).await;
    let client = client_for(base);
    let params = SimulationParameters::defaults_at(18);

    let history = client.fetch_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].hour, 0);
    assert_eq!(history[0].load_kw, 120.0);

    let prediction = client.fetch_prediction(&params).await.unwrap();
    assert_eq!(prediction.predicted_load, 150.0);
    assert_eq!(prediction.risk, RiskTier::Low);
    assert_eq!(prediction.components["ev_charging"], 25.0);

    let recommendation = client.fetch_recommendation(&params).await.unwrap();
    assert_eq!(recommendation.recommendation, "Usage is optimal.");
}

#[tokio::test]
async fn fetches_four_point_forecast() {
    let base = spawn_backend(mock_router()).await;
    let client = client_for(base);

    let forecast = client
        .fetch_forecast(&SimulationParameters::defaults_at(18))
        .await
        .unwrap();
    assert_eq!(forecast.len(), 4);
    assert_eq!(forecast[0].hour_offset, 0);
    assert_eq!(forecast[2].risk, RiskTier::High);
    assert_eq!(forecast[3].time_of_day, 21);
}

#[tokio::test]
async fn notify_reports_reached_customers() {
    let base = spawn_backend(mock_router()).await;
    let client = client_for(base);
    let params = SimulationParameters::defaults_at(20);

    let receipt = client
        .notify_customers(&params, 280.0, RiskTier::High)
        .await
        .unwrap();
    assert_eq!(receipt.status, "sent");
    assert_eq!(receipt.risk, RiskTier::High);
    assert_eq!(receipt.notified_customers, 80);
}

#[tokio::test]
async fn base_path_without_trailing_slash_is_honoured() {
    let router = Router::new().nest("/api", mock_router());
    let base = spawn_backend(router).await;
    // "http://host/api" without the trailing slash must still hit /api/data,
    // not /data.
    let bare = Url::parse(base.join("api").unwrap().as_str()).unwrap();
    assert!(!bare.path().ends_with('/'));
    let client = client_for(bare);

    let history = client.fetch_history().await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn unknown_risk_value_degrades_instead_of_failing() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({ "predicted_load": 90.0, "risk": "SEVERE" })) }),
    );
    let base = spawn_backend(router).await;
    let client = client_for(base);

    let prediction = client
        .fetch_prediction(&SimulationParameters::defaults_at(3))
        .await
        .unwrap();
    assert_eq!(prediction.risk, RiskTier::Unknown);
}

#[tokio::test]
async fn non_2xx_response_is_an_error() {
    let router = Router::new().route(
        "/data",
        get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_backend(router).await;
    let client = client_for(base);

    assert!(client.fetch_history().await.is_err());
}

#[tokio::test]
async fn malformed_payload_is_an_error() {
    let router = Router::new().route("/data", get(|| async { "not json" }));
    let base = spawn_backend(router).await;
    let client = client_for(base);

    assert!(client.fetch_history().await.is_err());
}

#[tokio::test]
async fn unreachable_backend_is_an_error() {
    // Port 9 (discard) is almost certainly closed; connection must fail fast.
    let base = Url::parse("http://127.0.0.1:9/").unwrap();
    let client = BackendClient::new(base, Duration::from_millis(500)).unwrap();
    assert!(client.fetch_history().await.is_err());
}
