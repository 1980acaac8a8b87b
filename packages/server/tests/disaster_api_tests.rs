mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use server_core::config::DEFAULT_ALERT_FEED_URL;
use server_core::kernel::test_dependencies::{
    submission, InMemoryStore, MockAI, MockAlertFeed, MockScraper, MockSocialSearch,
    MockWeather, CANNED_REPORT, TEST_REGION_FEED_URL,
};
use server_core::kernel::TestDependencies;

use common::TestApp;

// =============================================================================
// POST /process-disaster-data/
// =============================================================================

#[tokio::test]
async fn process_with_empty_body_returns_full_response() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    let body = body.expect("json body");
    for key in [
        "report_id",
        "disaster_type",
        "location",
        "affected_districts",
        "affected_population",
        "evacuation_centers",
        "disaster_specific_data",
        "most_affected_areas",
        "relief_operations",
        "active_incidents",
        "social_media_insights",
        "weather",
        "detailed_report",
        "action_plan",
        "severity_index",
    ] {
        assert!(body.get(key).is_some(), "missing key {}", key);
    }

    assert_eq!(body["disaster_type"], "flood");
    assert_eq!(body["location"], "East District");
    assert_eq!(body["detailed_report"], CANNED_REPORT);
    assert!(body["action_plan"].is_array());
    let severity = body["severity_index"].as_f64().unwrap();
    assert!((0.0..=10.0).contains(&severity));

    assert!(app.mocks.scraper.was_scraped("https://example.com"));
    assert_eq!(app.mocks.weather.calls(), vec![(85.123, 25.456)]);
    assert_eq!(app.mocks.store.report_count(), 1);
    assert_eq!(app.mocks.store.pages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn process_lowercases_disaster_type_and_uses_given_location() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app
        .post(
            "/process-disaster-data/",
            Some(json!({ "disaster_type": "FLOOD", "location": "Patna" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["location"], "Patna");

    let searches = app.mocks.social.calls();
    assert_eq!(searches.len(), 1);
    assert!(searches[0].query.contains("Patna"));
    assert!(searches[0].subreddits.contains(&"floods".to_string()));
}

#[tokio::test]
async fn unreachable_model_returns_500_with_error() {
    let mocks = TestDependencies::new().mock_ai(MockAI::failing("connection refused"));
    let app = TestApp::new(mocks);

    let (status, body) = app
        .post(
            "/process-disaster-data/",
            Some(json!({ "disaster_type": "flood", "location": "East District" })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body.unwrap()["error"].as_str().unwrap().to_string();
    assert!(error.contains("language model"));
    assert_eq!(app.mocks.store.report_count(), 0);
}

#[tokio::test]
async fn invalid_json_body_is_bad_request() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app
        .post("/process-disaster-data/", Some(json!({ "lat": "north" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["error"].is_string());
}

#[tokio::test]
async fn weather_failure_yields_unavailable_record() {
    let mocks = TestDependencies::new().mock_weather(MockWeather::failing());
    let app = TestApp::new(mocks);

    let (status, body) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    let weather = &body.unwrap()["weather"];
    assert_eq!(weather["status"], "unavailable");
    assert!(weather["temperature"].is_null());
    assert!(weather["humidity"].is_null());
}

#[tokio::test]
async fn scrape_failure_stores_placeholder_page() {
    let mocks = TestDependencies::new().mock_scraper(MockScraper::failing());
    let app = TestApp::new(mocks);

    let (status, _) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    let pages = app.mocks.store.pages.lock().unwrap();
    assert_eq!(pages[0].title, "Mock Disaster Title");
}

#[tokio::test]
async fn social_insights_are_ranked_and_filtered() {
    let now = Utc::now();
    let social = MockSocialSearch::new().with_submissions(vec![
        submission("a1", "Flood update", 5, now),
        submission("a2", "Heavy rain and flooding in East District", 50, now),
        submission("a3", "Short", 900, now),
    ]);
    let app = TestApp::new(TestDependencies::new().mock_social(social));

    let (status, body) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    let insights = body.unwrap()["social_media_insights"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(insights.len(), 1);
    assert_eq!(
        insights[0]["title"],
        "Heavy rain and flooding in East District"
    );
    assert_eq!(insights[0]["score"], 50);
    assert_eq!(app.mocks.store.posts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn social_search_failure_is_not_fatal() {
    let app = TestApp::new(TestDependencies::new().mock_social(MockSocialSearch::failing()));

    let (status, body) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["social_media_insights"], json!([]));
}

#[tokio::test]
async fn alert_feed_is_ingested_during_processing() {
    let feeds = MockAlertFeed::new().with_feed(
        DEFAULT_ALERT_FEED_URL,
        json!([
            {
                "id": 101,
                "title": "Heavy rainfall warning",
                "description": "Red alert for East District",
                "severity": "red",
                "type": "imd"
            }
        ]),
    );
    let app = TestApp::new(TestDependencies::new().mock_alert_feed(feeds));

    let (status, _) = app.post("/process-disaster-data/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.mocks.store.alerts.lock().unwrap().len(), 1);
    assert!(app.mocks.ai.was_called_with("Heavy rainfall warning"));
}

#[tokio::test]
async fn training_stores_samples_and_still_reports() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app
        .post("/process-disaster-data/", Some(json!({ "train": true })))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["detailed_report"].is_string());
    assert_eq!(app.mocks.store.samples.lock().unwrap().len(), 2);
}

// =============================================================================
// GET /process-disaster-data/ and /test-disaster-data/
// =============================================================================

#[tokio::test]
async fn fixture_defaults_to_flood() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.get("/process-disaster-data/").await;

    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["disaster_type"], "flood");
    assert_eq!(body["location"], "East District");
    assert!(body["weather"].is_null());
}

#[tokio::test]
async fn fixture_alias_accepts_each_supported_type() {
    let app = TestApp::new(TestDependencies::new());

    for disaster_type in ["flood", "earthquake", "cyclone", "wildfire", "landslide"] {
        let (status, _) = app
            .get(&format!("/test-disaster-data/?disaster_type={}", disaster_type))
            .await;
        assert_eq!(status, StatusCode::OK, "fixture {}", disaster_type);
    }
}

#[tokio::test]
async fn unknown_fixture_type_is_bad_request() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.get("/process-disaster-data/?disaster_type=tsunami").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.unwrap()["error"],
        "Invalid disaster type: tsunami. Supported types: flood, earthquake, cyclone, wildfire, landslide"
    );
}

// =============================================================================
// Alerts, regions, places, health, welcome
// =============================================================================

#[tokio::test]
async fn scrape_alerts_reports_new_count() {
    let feeds = MockAlertFeed::new().with_feed(
        DEFAULT_ALERT_FEED_URL,
        json!({
            "alerts": [
                { "id": "a-1", "title": "Quake", "description": "M5.1", "severity": "orange", "type": "earthquake" },
                { "id": "a-2", "title": "Missing severity", "description": "skip me" }
            ]
        }),
    );
    let app = TestApp::new(TestDependencies::new().mock_alert_feed(feeds));

    let (status, body) = app.post("/scrape-alerts/", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap()["message"], "1 new alerts saved.");

    let (status, body) = app.post("/scrape-alerts/", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap()["message"], "0 new alerts saved.");
}

#[tokio::test]
async fn scrape_alerts_upstream_failure_is_500() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.post("/scrape-alerts/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap()["error"], "Failed to fetch alerts");
}

#[tokio::test]
async fn scrape_regions_reports_new_count() {
    let feeds = MockAlertFeed::new().with_feed(
        TEST_REGION_FEED_URL,
        json!([
            { "name": "Coastal Belt", "type": "wave" },
            { "name": "Hill Pass", "type": "avalanche" },
            { "name": "Unknown Zone", "type": "volcano" }
        ]),
    );
    let app = TestApp::new(TestDependencies::new().mock_alert_feed(feeds));

    let (status, body) = app.post("/scrape-regions/", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.unwrap()["message"], "2 new regions saved.");
}

#[tokio::test]
async fn scrape_regions_failure_is_500() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.post("/scrape-regions/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.unwrap()["error"], "Failed to fetch regions");
}

#[tokio::test]
async fn nearby_places_passes_query_through() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app
        .get("/nearby-places/?lat=25.6&lon=85.1&place_type=police")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({ "places": [] }));

    let calls = app.mocks.places.calls();
    assert_eq!(calls[0].place_type, "police");
    assert_eq!(calls[0].radius, 1000.0);
}

#[tokio::test]
async fn nearby_places_rejects_out_of_range_latitude() {
    let app = TestApp::new(TestDependencies::new());

    let (status, _) = app.get("/nearby-places/?lat=123&lon=85.1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.mocks.places.calls().is_empty());
}

#[tokio::test]
async fn nearby_places_bad_query_uses_error_envelope() {
    let app = TestApp::new(TestDependencies::new());

    let (status, body) = app.get("/nearby-places/?lon=85.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body.unwrap()["error"].as_str().unwrap().to_string();
    assert!(message.starts_with("invalid query"));

    let (status, body) = app.get("/nearby-places/?lat=north&lon=85.1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.unwrap()["error"].is_string());
    assert!(app.mocks.places.calls().is_empty());
}

#[tokio::test]
async fn health_reports_store_state() {
    let app = TestApp::new(TestDependencies::new());
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "healthy");

    let sick = TestApp::new(
        TestDependencies::new().mock_store(InMemoryStore::unhealthy("Database query timed out")),
    );
    let (status, body) = sick.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let body = body.unwrap();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["error"], "Database query timed out");
}

#[tokio::test]
async fn welcome_text_at_root() {
    let app = TestApp::new(TestDependencies::new());

    let (status, text) = app.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(text.starts_with("Welcome to RESQNET!"));
}
