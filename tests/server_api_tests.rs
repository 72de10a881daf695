mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures_util::StreamExt;
use geodash::config::DashboardConfig;
use geodash::server::routes::route_request;
use geodash::server::{router, AppState};
use tower::ServiceExt;

fn state(name: &str) -> AppState {
    let config = DashboardConfig {
        data_dir: common::fixture_data_dir(name),
        static_dir: common::unique_temp_dir(&format!("{name}-static")),
        animation_interval_ms: 10,
        ..DashboardConfig::default()
    };
    AppState::load(config).expect("fixture data should load")
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response should be valid json")
}

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request(&state("health"), "GET", "/api/health");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
    let payload = json(&response.body);
    assert_eq!(payload["dashboards"]["trends"], true);
    assert_eq!(payload["dashboards"]["plants"], true);
}

#[test]
fn countries_endpoint_lists_the_canonical_table() {
    let response = route_request(&state("countries"), "GET", "/api/trends/countries");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    let countries = payload.as_array().expect("countries should be an array");
    assert_eq!(countries.len(), 4);
    assert_eq!(countries[0]["code"], "BIH");
    assert_eq!(countries[3]["region"], "North America");
}

#[test]
fn year_endpoint_joins_all_three_indicators() {
    let response = route_request(&state("year"), "GET", "/api/trends/year/2000");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);

    let codes: Vec<&str> = payload["points"]
        .as_array()
        .expect("points should be an array")
        .iter()
        .filter_map(|p| p["code"].as_str())
        .collect();
    assert_eq!(codes, ["FRA", "USA"]);
    assert_eq!(payload["kpis"]["population_label"], "340M");
    assert_eq!(payload["regions"][0]["region"], "North America");

    let shades = payload["map"].as_array().expect("map should be an array");
    assert_eq!(shades.len(), 3);
    assert_eq!(shades[2]["code"], "BIH");
    assert_eq!(shades[2]["life_expectancy"], 74.0);
}

#[test]
fn year_endpoint_rejects_bad_years() {
    let state = state("bad-year");
    assert_eq!(route_request(&state, "GET", "/api/trends/year/soon").status_code, 400);
    assert_eq!(route_request(&state, "GET", "/api/trends/year/1700").status_code, 400);
}

#[test]
fn plants_endpoint_applies_fuel_and_year_filters() {
    let state = state("plants");
    let response = route_request(&state, "GET", "/api/plants?fuel=Hydro&from=1950&to=2000");
    assert_eq!(response.status_code, 200);
    let payload = json(&response.body);
    assert_eq!(payload["kpis"]["plant_count"], 1);
    assert_eq!(payload["kpis"]["fuel_label"], "HYDRO");
    assert_eq!(payload["kpis"]["banner"], "Filtering: 1 plants from 1950 to 2000.");
    assert_eq!(payload["timeline"]["x_domain"], serde_json::json!([1949, 2001]));

    let all = json(&route_request(&state, "GET", "/api/plants?fuel=ALL").body);
    assert_eq!(all["kpis"]["plant_count"], 6);
    assert_eq!(all["timeline"]["x_domain"], serde_json::json!([1942, 2010]));
}

#[test]
fn viewport_endpoint_switches_layers_on_zoom() {
    let state = state("viewport");
    let world = route_request(
        &state,
        "GET",
        "/api/plants/viewport?lon_min=-180&lon_max=180&lat_min=-90&lat_max=90&zoom=1",
    );
    assert_eq!(world.status_code, 200);
    let payload = json(&world.body);
    assert_eq!(payload["mode"], "countries");
    assert_eq!(payload["countries"][0]["country"], "USA");
    assert_eq!(payload["countries"][0]["lon"], -95.0);

    let zoomed = route_request(
        &state,
        "GET",
        "/api/plants/viewport?lon_min=-3&lon_max=1&lat_min=48&lat_max=50&zoom=4",
    );
    let payload = json(&zoomed.body);
    assert_eq!(payload["mode"], "plants");
    assert_eq!(payload["in_view"], 2);

    let missing = route_request(&state, "GET", "/api/plants/viewport?zoom=4");
    assert_eq!(missing.status_code, 400);
}

#[test]
fn unknown_routes_and_methods_are_rejected() {
    let state = state("unknown");
    assert_eq!(route_request(&state, "GET", "/api/weather").status_code, 404);
    assert_eq!(route_request(&state, "POST", "/api/health").status_code, 405);
}

#[test]
fn disabled_dashboard_answers_service_unavailable() {
    let config = DashboardConfig {
        data_dir: common::fixture_data_dir("disabled"),
        plants_enabled: false,
        ..DashboardConfig::default()
    };
    let state = AppState::load(config).expect("trends should load alone");
    let response = route_request(&state, "GET", "/api/plants");
    assert_eq!(response.status_code, 503);
    assert_eq!(route_request(&state, "GET", "/api/trends/year/2001").status_code, 200);
}

#[tokio::test]
async fn router_serves_api_through_axum() {
    let app = router(Arc::new(state("router")));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trends/year/2001")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be json");
    assert_eq!(payload["year"], 2001);
    assert_eq!(payload["points"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn play_stream_emits_frames_from_the_requested_year() {
    let app = router(Arc::new(state("play")));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trends/play?from=2000")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().ok(),
        Some("text/event-stream")
    );

    let mut body = response.into_body().into_data_stream();
    let mut text = String::new();
    while !text.contains("id: 2001") {
        let chunk = body
            .next()
            .await
            .expect("stream should stay open")
            .expect("chunk should be readable");
        text.push_str(&String::from_utf8_lossy(&chunk));
    }
    assert!(text.contains("event: frame"));
    assert!(text.contains("\"year\":2000"));
}

#[tokio::test]
async fn play_stream_rejects_bad_start_years_as_json() {
    let app = router(Arc::new(state("play-bad")));
    for uri in ["/api/trends/play?from=soon", "/api/trends/play?from=3000"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request should build"))
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"].to_str().ok(),
            Some("application/json")
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("body should be json");
        assert_eq!(payload["status"], "error");
    }
}

#[test]
fn viewport_rejects_malformed_numbers() {
    let state = state("viewport-bad");
    let response = route_request(
        &state,
        "GET",
        "/api/plants/viewport?lon_min=west&lon_max=1&lat_min=48&lat_max=50",
    );
    assert_eq!(response.status_code, 400);
    assert_eq!(route_request(&state, "GET", "/api/plants?from=19x9").status_code, 400);
}
