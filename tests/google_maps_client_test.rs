use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use vax_reminder::core::enricher::LocationEnricher;
use vax_reminder::core::{Coordinates, FacilityInfo, LocationService, LookupFailurePolicy};
use vax_reminder::{GoogleMapsClient, ReminderError};

const API_KEY: &str = "test-key";

fn client(server: &MockServer) -> GoogleMapsClient {
    GoogleMapsClient::new(server.base_url(), API_KEY, "driving", Duration::from_secs(5)).unwrap()
}

fn geocode_ok(lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{"geometry": {"location": {"lat": lat, "lng": lng}}}]
    })
}

fn hospital_results() -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [
            {
                "name": "Springfield General",
                "vicinity": "1 Hospital Rd",
                "geometry": {"location": {"lat": 40.01, "lng": -75.01}}
            },
            {
                "name": "Shelbyville Clinic",
                "vicinity": "7 Far Away Ln",
                "geometry": {"location": {"lat": 40.5, "lng": -75.5}}
            }
        ]
    })
}

fn distance_element(status: &str) -> serde_json::Value {
    json!({
        "status": "OK",
        "rows": [{"elements": [{"status": status, "distance": {"text": "1.6 km", "value": 1600}}]}]
    })
}

#[tokio::test]
async fn test_geocode_sends_address_and_key() -> Result<()> {
    let server = MockServer::start_async().await;
    let geocode = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/geocode/json")
                .query_param("address", "12 Main St, Springfield")
                .query_param("key", API_KEY);
            then.status(200).json_body(geocode_ok(40.0, -75.0));
        })
        .await;

    let origin = client(&server).geocode("12 Main St, Springfield").await?;

    geocode.assert_async().await;
    assert_eq!(origin, Some(Coordinates { lat: 40.0, lng: -75.0 }));
    Ok(())
}

#[tokio::test]
async fn test_nearby_search_ranks_by_distance_and_takes_first() -> Result<()> {
    let server = MockServer::start_async().await;
    let nearby = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/place/nearbysearch/json")
                .query_param("location", "40,-75")
                .query_param("rankby", "distance")
                .query_param("type", "hospital");
            then.status(200).json_body(hospital_results());
        })
        .await;

    let place = client(&server)
        .nearest_facility(Coordinates { lat: 40.0, lng: -75.0 }, "hospital")
        .await?
        .expect("a facility");

    nearby.assert_async().await;
    assert_eq!(place.name, "Springfield General");
    assert_eq!(place.address, "1 Hospital Rd");
    assert_eq!(place.location, Coordinates { lat: 40.01, lng: -75.01 });
    Ok(())
}

#[tokio::test]
async fn test_distance_matrix_element_status() -> Result<()> {
    let server = MockServer::start_async().await;
    let ok = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/distancematrix/json")
                .query_param("destinations", "40.01,-75.01")
                .query_param("mode", "driving");
            then.status(200).json_body(distance_element("OK"));
        })
        .await;
    let not_found = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/distancematrix/json")
                .query_param("destinations", "50,-80");
            then.status(200).json_body(distance_element("NOT_FOUND"));
        })
        .await;

    let maps = client(&server);
    let origin = Coordinates { lat: 40.0, lng: -75.0 };

    let found = maps
        .travel_distance(origin, Coordinates { lat: 40.01, lng: -75.01 })
        .await?;
    let missing = maps
        .travel_distance(origin, Coordinates { lat: 50.0, lng: -80.0 })
        .await?;

    ok.assert_async().await;
    not_found.assert_async().await;
    assert_eq!(found.as_deref(), Some("1.6 km"));
    assert_eq!(missing, None);
    Ok(())
}

#[tokio::test]
async fn test_zero_results_degrades_to_unavailable() -> Result<()> {
    let server = MockServer::start_async().await;
    let geocode = server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200)
                .json_body(json!({"status": "ZERO_RESULTS", "results": []}));
        })
        .await;
    let nearby = server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(200).json_body(hospital_results());
        })
        .await;

    let enricher = LocationEnricher::new(client(&server), "hospital", LookupFailurePolicy::Abort);
    let info = enricher.locate("Atlantis").await?;

    geocode.assert_async().await;
    assert_eq!(nearby.hits_async().await, 0);
    assert_eq!(info, FacilityInfo::unavailable());
    Ok(())
}

#[tokio::test]
async fn test_no_nearby_facility_degrades_to_unavailable() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).json_body(geocode_ok(40.0, -75.0));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/place/nearbysearch/json");
            then.status(200)
                .json_body(json!({"status": "ZERO_RESULTS", "results": []}));
        })
        .await;

    let enricher = LocationEnricher::new(client(&server), "hospital", LookupFailurePolicy::Abort);
    assert_eq!(enricher.locate("12 Main St").await?, FacilityInfo::unavailable());
    Ok(())
}

#[tokio::test]
async fn test_request_denied_is_a_lookup_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(200).json_body(json!({
                "status": "REQUEST_DENIED",
                "error_message": "The provided API key is invalid.",
                "results": []
            }));
        })
        .await;

    let strict = LocationEnricher::new(client(&server), "hospital", LookupFailurePolicy::Abort);
    let err = strict.locate("12 Main St").await.unwrap_err();
    assert!(matches!(err, ReminderError::LookupError { .. }));

    let lenient = LocationEnricher::new(client(&server), "hospital", LookupFailurePolicy::Degrade);
    assert_eq!(lenient.locate("12 Main St").await?, FacilityInfo::unavailable());
    Ok(())
}

#[tokio::test]
async fn test_http_failure_is_transport_error() -> Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/maps/api/geocode/json");
            then.status(500);
        })
        .await;

    let err = client(&server).geocode("12 Main St").await.unwrap_err();
    assert!(matches!(err, ReminderError::HttpError(_)));
    assert!(err.is_lookup_failure());
    Ok(())
}
