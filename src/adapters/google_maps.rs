//! Google Maps web services (geocoding, places nearby search, distance matrix).

use crate::config::toml_config::MapsConfig;
use crate::core::{Coordinates, LocationService, Place, Result};
use crate::utils::error::ReminderError;
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_MAPS_ENDPOINT: &str = "https://maps.googleapis.com";

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    client: Client,
    endpoint: String,
    api_key: String,
    travel_mode: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    #[serde(default)]
    vicinity: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<DistanceRow>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    #[serde(default)]
    elements: Vec<DistanceElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceElement {
    status: String,
    distance: Option<DistanceText>,
}

#[derive(Debug, Deserialize)]
struct DistanceText {
    text: String,
}

fn format_location(point: Coordinates) -> String {
    format!("{},{}", point.lat, point.lng)
}

/// `Ok(true)` when the service returned data, `Ok(false)` for an empty answer.
fn check_status(service: &str, status: &str, error_message: Option<String>) -> Result<bool> {
    match status {
        STATUS_OK => Ok(true),
        STATUS_ZERO_RESULTS => Ok(false),
        other => Err(ReminderError::LookupError {
            service: service.to_string(),
            message: match error_message {
                Some(detail) => format!("{} ({})", other, detail),
                None => other.to_string(),
            },
        }),
    }
}

impl GoogleMapsClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        travel_mode: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            travel_mode: travel_mode.into(),
        })
    }

    /// Fails with a configuration error when no usable API key is configured.
    pub fn from_settings(settings: &MapsConfig) -> Result<Self> {
        let api_key = validate_required_field("maps.api_key", &settings.api_key)?;
        validate_non_empty_string("maps.api_key", api_key)?;

        Self::new(
            settings.endpoint.as_str(),
            api_key.as_str(),
            settings.travel_mode.as_str(),
            Duration::from_secs(settings.timeout_seconds),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.endpoint, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LocationService for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinates>> {
        let response: GeocodeResponse = self
            .get_json(GEOCODE_PATH, &[("address", address.to_string())])
            .await?;

        if !check_status("geocode", &response.status, response.error_message)? {
            return Ok(None);
        }
        Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location.into()))
    }

    async fn nearest_facility(&self, origin: Coordinates, category: &str) -> Result<Option<Place>> {
        let response: NearbySearchResponse = self
            .get_json(
                NEARBY_SEARCH_PATH,
                &[
                    ("location", format_location(origin)),
                    ("rankby", "distance".to_string()),
                    ("type", category.to_string()),
                ],
            )
            .await?;

        if !check_status("nearby search", &response.status, response.error_message)? {
            return Ok(None);
        }
        // rankby=distance 時第一筆即最近
        Ok(response.results.into_iter().next().map(|place| Place {
            name: place.name,
            address: place.vicinity,
            location: place.geometry.location.into(),
        }))
    }

    async fn travel_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<Option<String>> {
        let response: DistanceMatrixResponse = self
            .get_json(
                DISTANCE_MATRIX_PATH,
                &[
                    ("origins", format_location(origin)),
                    ("destinations", format_location(destination)),
                    ("mode", self.travel_mode.clone()),
                ],
            )
            .await?;

        if !check_status("distance matrix", &response.status, response.error_message)? {
            return Ok(None);
        }

        let element = response
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next());

        Ok(match element {
            Some(DistanceElement {
                status,
                distance: Some(distance),
            }) if status == STATUS_OK => Some(distance.text),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_status() {
        assert!(check_status("geocode", "OK", None).unwrap());
        assert!(!check_status("geocode", "ZERO_RESULTS", None).unwrap());

        let err = check_status(
            "geocode",
            "REQUEST_DENIED",
            Some("The provided API key is invalid.".to_string()),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "geocode lookup failed: REQUEST_DENIED (The provided API key is invalid.)"
        );
    }

    #[test]
    fn test_from_settings_requires_key() {
        let mut settings = MapsConfig::default();
        assert!(matches!(
            GoogleMapsClient::from_settings(&settings),
            Err(ReminderError::MissingConfigError { .. })
        ));

        settings.api_key = Some("${GOOGLE_MAPS_API_KEY}".to_string());
        assert!(GoogleMapsClient::from_settings(&settings).is_err());

        settings.api_key = Some("test-key".to_string());
        assert!(GoogleMapsClient::from_settings(&settings).is_ok());
    }

    #[test]
    fn test_location_formatting() {
        assert_eq!(format_location(Coordinates { lat: 40.5, lng: -75.25 }), "40.5,-75.25");
    }
}
