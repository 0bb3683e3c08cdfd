//! Asynchronous client for the places autocomplete API.
//!
//! Speaks the Google Places wire format: an autocomplete endpoint returning
//! predictions and a details endpoint returning address components, which
//! `address_fields_from` folds into the manual address form.

mod error;

pub use error::PlacesError;

use log::*;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Minimum query length before a search is worth issuing.
pub const MIN_QUERY_LEN: usize = 3;

/// A single autocomplete suggestion.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    pub description: String,
    pub place_id: String,
}

/// One component of a resolved address.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Details for a resolved place.
///
#[derive(Clone, Debug, Deserialize, Default, PartialEq, Eq)]
pub struct PlaceDetails {
    #[serde(default)]
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

/// Structured address fields extracted from place details.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressFields {
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

/// Responsible for asynchronous interaction with the places API including
/// transformation of response data into explicitly-defined types.
///
pub struct Places {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl Places {
    /// Returns a new instance for the given API key.
    ///
    pub fn new(api_key: &str) -> Places {
        Places::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Returns a new instance pointed at a custom base URL. Used by tests to
    /// target a mock server.
    ///
    pub fn with_base_url(api_key: &str, base_url: &str) -> Places {
        Places {
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Return autocomplete predictions for the query. Short queries resolve
    /// to an empty list without issuing a request.
    ///
    pub async fn autocomplete(&self, query: &str) -> Result<Vec<Prediction>, PlacesError> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(vec![]);
        }
        debug!("Requesting place predictions for '{}'...", query);
        let url = format!("{}/autocomplete/json", self.base_url);
        let response: AutocompleteResponse = self
            .http_client
            .get(&url)
            .query(&[("input", query), ("key", &self.api_key)])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| PlacesError::ParseFailed(e.to_string()))?;
        match response.status.as_str() {
            // ZERO_RESULTS is a successful empty answer, not a failure.
            "OK" | "ZERO_RESULTS" => Ok(response.predictions),
            status => Err(PlacesError::ApiStatus {
                status: status.to_string(),
            }),
        }
    }

    /// Return details for a place id.
    ///
    pub async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        debug!("Requesting place details for '{}'...", place_id);
        let url = format!("{}/details/json", self.base_url);
        let response: DetailsResponse = self
            .http_client
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("key", &self.api_key),
                ("fields", "formatted_address,address_component"),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| PlacesError::ParseFailed(e.to_string()))?;
        if response.status != "OK" {
            return Err(PlacesError::ApiStatus {
                status: response.status,
            });
        }
        Ok(response.result.unwrap_or_default())
    }
}

/// Fold place details into the structured form fields, following the
/// component types the original address form consumes.
///
pub fn address_fields_from(details: &PlaceDetails) -> AddressFields {
    let mut fields = AddressFields::default();
    for component in &details.address_components {
        let types: Vec<&str> = component.types.iter().map(String::as_str).collect();
        if types.contains(&"street_number") {
            fields.number = component.long_name.clone();
        } else if types.contains(&"route") {
            fields.street = component.long_name.clone();
        } else if types.contains(&"sublocality_level_1") || types.contains(&"neighborhood") {
            fields.district = component.long_name.clone();
        } else if types.contains(&"locality") {
            fields.city = component.long_name.clone();
        } else if types.contains(&"postal_code") {
            fields.postal_code = component.long_name.clone();
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn component(long_name: &str, types: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: long_name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_address_fields_from_components() {
        let details = PlaceDetails {
            formatted_address: "123 Main St, Springfield".to_string(),
            address_components: vec![
                component("123", &["street_number"]),
                component("Main St", &["route"]),
                component("Downtown", &["sublocality_level_1", "political"]),
                component("Springfield", &["locality", "political"]),
                component("62704", &["postal_code"]),
                component("Illinois", &["administrative_area_level_1"]),
            ],
        };
        let fields = address_fields_from(&details);
        assert_eq!(fields.number, "123");
        assert_eq!(fields.street, "Main St");
        assert_eq!(fields.district, "Downtown");
        assert_eq!(fields.city, "Springfield");
        assert_eq!(fields.postal_code, "62704");
    }

    #[test]
    fn test_address_fields_missing_components() {
        let details = PlaceDetails {
            formatted_address: "Springfield".to_string(),
            address_components: vec![component("Springfield", &["locality"])],
        };
        let fields = address_fields_from(&details);
        assert_eq!(fields.city, "Springfield");
        assert!(fields.street.is_empty());
        assert!(fields.postal_code.is_empty());
    }

    #[tokio::test]
    async fn test_autocomplete_returns_predictions() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/autocomplete/json")
                .query_param("input", "main st");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "predictions": [
                    { "description": "Main St, Springfield", "place_id": "abc123" }
                ]
            }));
        });

        let places = Places::with_base_url("test-key", &server.base_url());
        let predictions = places.autocomplete("main st").await.unwrap();
        mock.assert();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].place_id, "abc123");
    }

    #[tokio::test]
    async fn test_autocomplete_skips_short_queries() {
        let places = Places::with_base_url("test-key", "http://127.0.0.1:9");
        let predictions = places.autocomplete("ma").await.unwrap();
        assert!(predictions.is_empty());
    }

    #[tokio::test]
    async fn test_autocomplete_surfaces_api_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/autocomplete/json");
            then.status(200)
                .json_body(serde_json::json!({ "status": "REQUEST_DENIED" }));
        });

        let places = Places::with_base_url("bad-key", &server.base_url());
        let result = places.autocomplete("main st").await;
        assert!(matches!(
            result,
            Err(PlacesError::ApiStatus { status }) if status == "REQUEST_DENIED"
        ));
    }

    #[tokio::test]
    async fn test_details_returns_components() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/details/json")
                .query_param("place_id", "abc123");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "result": {
                    "formatted_address": "123 Main St",
                    "address_components": [
                        { "long_name": "123", "types": ["street_number"] }
                    ]
                }
            }));
        });

        let places = Places::with_base_url("test-key", &server.base_url());
        let details = places.details("abc123").await.unwrap();
        assert_eq!(details.formatted_address, "123 Main St");
        assert_eq!(details.address_components.len(), 1);
    }
}
