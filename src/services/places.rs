use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, DistanceMeters};
use crate::services::provider::{PlaceCandidate, PlaceSearchProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

/// Public text-search endpoint.
const PLACES_SEARCH_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchText";

/// Attributes requested from the service. Responses only carry masked fields,
/// so this list must stay in sync with the response structs below.
const PLACES_FIELD_MASK: &str = "places.id,places.displayName,places.location,\
places.formattedAddress,places.internationalPhoneNumber,places.websiteUri,\
places.rating,places.userRatingCount,places.priceLevel,places.primaryTypeDisplayName";

/// HTTP client for the places text-search API.
/// Uses exponential backoff retry for rate limiting and timeouts.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, PLACES_SEARCH_ENDPOINT.to_string())
    }

    /// Point the client at a non-default endpoint (test servers, proxies).
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        PlacesClient {
            client: Client::new(),
            api_key,
            endpoint,
        }
    }

    fn build_body(
        &self,
        keyword: &str,
        center: &Coordinates,
        span: DistanceMeters,
    ) -> serde_json::Value {
        // The service biases by circle; our callers think in square regions
        // of side `span`, so the circle radius is half the span, clamped to
        // the service ceiling.
        let radius = (span.as_meters() / 2.0).min(PLACES_MAX_BIAS_RADIUS_METERS);

        json!({
            "textQuery": keyword,
            "maxResultCount": PLACES_MAX_RESULT_COUNT_PER_QUERY,
            "locationBias": {
                "circle": {
                    "center": {
                        "latitude": center.lat,
                        "longitude": center.lng,
                    },
                    "radius": radius,
                }
            }
        })
    }

    /// Execute the search with configurable retry logic.
    /// Retries transport failures, timeouts, and rate-limit/gateway statuses
    /// with exponential backoff; anything else fails immediately.
    async fn execute_with_retry(
        &self,
        body: serde_json::Value,
        max_retries: usize,
    ) -> Result<Vec<PlaceCandidate>> {
        let mut retry_count = 0;

        loop {
            let response_result = self
                .client
                .post(&self.endpoint)
                .header("X-Goog-Api-Key", &self.api_key)
                .header("X-Goog-FieldMask", PLACES_FIELD_MASK)
                .json(&body)
                .timeout(std::time::Duration::from_secs(PLACES_QUERY_TIMEOUT_SECONDS))
                .send()
                .await;

            let response = match response_result {
                Ok(resp) => resp,
                Err(e) => {
                    let error_msg = if e.is_timeout() {
                        "Request timed out".to_string()
                    } else {
                        format!("Request failed: {}", e)
                    };

                    if retry_count < max_retries {
                        retry_count += 1;
                        let backoff_ms = 1000 * (2_u64.pow(retry_count as u32));

                        tracing::warn!(
                            "Places query {}, retrying in {}ms (attempt {}/{})",
                            error_msg,
                            backoff_ms,
                            retry_count + 1,
                            max_retries + 1
                        );

                        tokio::time::sleep(std::time::Duration::from_millis(backoff_ms)).await;
                        continue;
                    } else {
                        return Err(AppError::Provider(format!(
                            "{} after {} attempts",
                            error_msg,
                            max_retries + 1
                        )));
                    }
                }
            };

            let status = response.status();

            if status.is_success() {
                let api_response: SearchTextResponse = response
                    .json()
                    .await
                    .map_err(|e| AppError::Provider(format!("Failed to parse response: {}", e)))?;

                return Ok(self.convert_places(api_response.places));
            }

            let is_retryable = status == StatusCode::TOO_MANY_REQUESTS
                || status == StatusCode::SERVICE_UNAVAILABLE
                || status == StatusCode::GATEWAY_TIMEOUT;

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if is_retryable && retry_count < max_retries {
                retry_count += 1;
                let backoff_ms = 1000 * (2_u64.pow(retry_count as u32));

                tracing::warn!(
                    "Places query returned HTTP {}, retrying in {}ms (attempt {}/{})",
                    status,
                    backoff_ms,
                    retry_count + 1,
                    max_retries + 1
                );

                tokio::time::sleep(std::time::Duration::from_millis(backoff_ms)).await;
                continue;
            }

            return Err(AppError::Provider(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }
    }

    fn convert_places(&self, places: Vec<PlaceResult>) -> Vec<PlaceCandidate> {
        let total = places.len();
        let candidates: Vec<PlaceCandidate> = places
            .into_iter()
            .filter_map(|place| {
                let name = place.display_name?.text;
                let location = place.location?;
                let coordinates = Coordinates::new(location.latitude, location.longitude).ok()?;

                Some(PlaceCandidate {
                    provider_id: place.id,
                    name,
                    coordinates,
                    phone: place.international_phone_number,
                    url: place.website_uri,
                    address: place.formatted_address,
                    rating: place.rating,
                    user_rating_count: place.user_rating_count,
                    price_level: place.price_level.as_deref().and_then(parse_price_level),
                    category: place.primary_type_display_name.map(|t| t.text),
                })
            })
            .collect();

        if candidates.len() < total {
            tracing::debug!(
                "Dropped {} of {} places missing a name or location",
                total - candidates.len(),
                total
            );
        }

        candidates
    }
}

#[async_trait]
impl PlaceSearchProvider for PlacesClient {
    async fn query(
        &self,
        keyword: &str,
        center: &Coordinates,
        span: DistanceMeters,
    ) -> Result<Vec<PlaceCandidate>> {
        let body = self.build_body(keyword, center, span);

        tracing::debug!("Places text-search body: {}", body);

        self.execute_with_retry(body, PLACES_RETRY_MAX_ATTEMPTS).await
    }
}

/// Map the service's price-level enum onto the 0-4 bucket the app uses.
fn parse_price_level(level: &str) -> Option<u8> {
    match level {
        "PRICE_LEVEL_FREE" => Some(0),
        "PRICE_LEVEL_INEXPENSIVE" => Some(1),
        "PRICE_LEVEL_MODERATE" => Some(2),
        "PRICE_LEVEL_EXPENSIVE" => Some(3),
        "PRICE_LEVEL_VERY_EXPENSIVE" => Some(4),
        _ => None,
    }
}

// Places API response types

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceResult {
    id: Option<String>,
    display_name: Option<LocalizedText>,
    location: Option<LatLng>,
    formatted_address: Option<String>,
    international_phone_number: Option<String>,
    website_uri: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
    price_level: Option<String>,
    primary_type_display_name: Option<LocalizedText>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}
