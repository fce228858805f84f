//! Golemio HTTP client.
//!
//! Queries the PID departure-board endpoint of the Golemio open-data API.
//! Handles authentication and status mapping; normalization into domain
//! types happens separately in [`convert`](super::convert).

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use super::error::GolemioError;
use super::provider::{BoardQuery, DepartureProvider};
use super::types::BoardResponse;

/// Default base URL for the Golemio API.
const DEFAULT_BASE_URL: &str = "https://api.golemio.cz";

/// Path of the departure-board endpoint.
const DEPARTURE_BOARDS_PATH: &str = "/v2/pid/departureboards";

const DEFAULT_LIMIT: u32 = 60;

const DEFAULT_MINUTES_AFTER: u32 = 90;

/// Configuration for the Golemio client.
#[derive(Debug, Clone)]
pub struct GolemioConfig {
    /// Access token sent as `x-access-token`
    pub api_key: String,
    /// Base URL for the API (defaults to production Golemio)
    pub base_url: String,
    /// Maximum departure records per request
    pub limit: u32,
    /// Look-ahead window in minutes
    pub minutes_after: u32,
    /// Whether metro-line trains are included in the board
    pub include_metro_trains: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GolemioConfig {
    /// Create a new config with the given access token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            minutes_after: DEFAULT_MINUTES_AFTER,
            include_metro_trains: true,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_minutes_after(mut self, minutes: u32) -> Self {
        self.minutes_after = minutes;
        self
    }

    pub fn with_include_metro_trains(mut self, include: bool) -> Self {
        self.include_metro_trains = include;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Golemio departure-board client.
#[derive(Debug, Clone)]
pub struct GolemioClient {
    http: reqwest::Client,
    base_url: String,
    limit: u32,
    minutes_after: u32,
    include_metro_trains: bool,
}

impl GolemioClient {
    /// Create a new Golemio client with the given configuration.
    pub fn new(config: GolemioConfig) -> Result<Self, GolemioError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| GolemioError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("x-access-token", api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
            minutes_after: config.minutes_after,
            include_metro_trains: config.include_metro_trains,
        })
    }

    /// Full URL of the departure-board endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DEPARTURE_BOARDS_PATH)
    }

    /// Query-string pairs for a request: one pair per id, then the fixed
    /// parameters.
    pub fn query_pairs(&self, query: &BoardQuery) -> Vec<(&'static str, String)> {
        let param = query.scheme.param();

        let mut pairs: Vec<(&'static str, String)> =
            query.ids.iter().map(|id| (param, id.clone())).collect();

        pairs.push(("limit", query.limit.unwrap_or(self.limit).to_string()));
        pairs.push((
            "minutesAfter",
            query
                .minutes_after
                .unwrap_or(self.minutes_after)
                .to_string(),
        ));
        if self.include_metro_trains {
            pairs.push(("includeMetroTrains", "true".to_string()));
        }

        pairs
    }

    /// Fetch and parse a departure board.
    pub async fn get_departure_board(
        &self,
        query: &BoardQuery,
    ) -> Result<BoardResponse, GolemioError> {
        if query.is_empty() {
            return Err(GolemioError::NoIds);
        }

        debug!(scheme = %query.scheme, ids = ?query.ids, "fetching departure board");

        let response = self
            .http
            .get(self.endpoint())
            .query(&self.query_pairs(query))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(GolemioError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GolemioError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GolemioError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GolemioError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl DepartureProvider for GolemioClient {
    async fn fetch_board(&self, query: &BoardQuery) -> Result<BoardResponse, GolemioError> {
        self.get_departure_board(query).await
    }
}
