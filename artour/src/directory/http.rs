//! HTTP directory client
//!
//! [`HttpDirectoryClient`] performs the actual directory lookup over
//! HTTP, generic over an [`AsyncHttpClient`] so tests can inject a mock
//! transport. [`ReqwestClient`] is the production transport.
//!
//! The wire format is a Yelp-style business search response:
//!
//! ```json
//! { "businesses": [
//!     { "id": "...", "name": "...",
//!       "coordinates": { "latitude": 48.85, "longitude": 2.35 },
//!       "rating": 4.5,
//!       "categories": [ { "title": "Cafe" } ],
//!       "location": { "address1": "1 Rue de Rivoli" } }
//! ] }
//! ```

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::{DirectoryClient, DirectoryError};
use crate::geo::Coordinate;
use crate::poi::Poi;

/// Default search endpoint. `{lat}` and `{lon}` are replaced per request.
pub const DEFAULT_ENDPOINT: &str =
    "https://api.yelp.com/v3/businesses/search?latitude={lat}&longitude={lon}&limit=20";

/// Trait for asynchronous HTTP transport operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP transports in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// Returns the response body as bytes or an error.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, DirectoryError>> + Send;

    /// Performs an async HTTP GET request with Bearer token authentication.
    fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> impl Future<Output = Result<Vec<u8>, DirectoryError>> + Send;
}

/// Real HTTP transport implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl ReqwestClient {
    /// Create a transport with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DirectoryError::Http(e.to_string()))?;
        Ok(Self {
            client,
            timeout_secs,
        })
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, DirectoryError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DirectoryError::Timeout(self.timeout_secs)
            } else {
                DirectoryError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DirectoryError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, DirectoryError> {
        self.execute(self.client.get(url)).await
    }

    async fn get_with_bearer(
        &self,
        url: &str,
        bearer_token: &str,
    ) -> Result<Vec<u8>, DirectoryError> {
        self.execute(self.client.get(url).bearer_auth(bearer_token))
            .await
    }
}

/// Wire model for one business record.
#[derive(Debug, Deserialize)]
struct BusinessRecord {
    id: String,
    name: String,
    coordinates: WireCoordinates,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    categories: Vec<CategoryRecord>,
    #[serde(default)]
    location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireCoordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
    title: String,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    #[serde(default)]
    address1: Option<String>,
}

/// Wire model for the search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    businesses: Vec<BusinessRecord>,
}

impl From<BusinessRecord> for Poi {
    fn from(record: BusinessRecord) -> Self {
        let mut poi = Poi::new(
            record.id,
            record.name,
            Coordinate::new(record.coordinates.latitude, record.coordinates.longitude),
        );
        if let Some(rating) = record.rating {
            poi = poi.with_rating(rating);
        }
        if let Some(category) = record.categories.into_iter().next() {
            poi = poi.with_category(category.title);
        }
        if let Some(address) = record.location.and_then(|l| l.address1) {
            poi = poi.with_address(address);
        }
        poi
    }
}

/// Directory client performing Yelp-style business searches over HTTP.
pub struct HttpDirectoryClient<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    api_key: Option<String>,
}

impl<C: AsyncHttpClient> HttpDirectoryClient<C> {
    /// Create a client against the default endpoint.
    pub fn new(http_client: C, api_key: Option<String>) -> Self {
        Self::with_endpoint(http_client, DEFAULT_ENDPOINT.to_string(), api_key)
    }

    /// Create a client against a custom endpoint.
    ///
    /// Useful for testing or alternative directory services. The
    /// endpoint should contain `{lat}` and `{lon}` as placeholders.
    pub fn with_endpoint(http_client: C, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            http_client,
            endpoint,
            api_key,
        }
    }

    /// Constructs the search URL for a position.
    fn build_url(&self, location: &Coordinate) -> String {
        self.endpoint
            .replace("{lat}", &location.latitude.to_string())
            .replace("{lon}", &location.longitude.to_string())
    }

    fn parse_response(body: &[u8]) -> Result<Vec<Poi>, DirectoryError> {
        let response: SearchResponse = serde_json::from_slice(body)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        Ok(response.businesses.into_iter().map(Poi::from).collect())
    }
}

impl<C: AsyncHttpClient> DirectoryClient for HttpDirectoryClient<C> {
    async fn fetch_nearby(&self, location: Coordinate) -> Result<Vec<Poi>, DirectoryError> {
        let url = self.build_url(&location);

        let body = match &self.api_key {
            Some(key) => self.http_client.get_with_bearer(&url, key).await,
            None => self.http_client.get(&url).await,
        };

        let body = body.inspect_err(|e| {
            warn!(%location, error = %e, "Directory lookup failed");
        })?;

        let pois = Self::parse_response(&body)?;
        debug!(%location, count = pois.len(), "Directory lookup succeeded");
        Ok(pois)
    }

    fn name(&self) -> &str {
        "HTTP directory"
    }
}
