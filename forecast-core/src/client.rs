use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::model::ForecastResponse;

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure of a single forecast fetch.
///
/// Both kinds are terminal for the in-flight request only; the session stays
/// usable and retries go through the same `fetch` call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connectivity problem, timeout, or a non-2xx response status.
    #[error("network error: {0}")]
    Network(String),

    /// Response body that does not match the expected forecast schema.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Seam between the session and the network, so tests can substitute fakes.
#[async_trait]
pub trait FetchForecast: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<ForecastResponse, FetchError>;
}

/// Client for the OpenWeather 5-day forecast endpoint.
///
/// Issues exactly one outbound request per `fetch` call; retry is the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    api_key: String,
    http: Client,
    base_url: String,
    count: Option<u32>,
}

impl ForecastClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, FORECAST_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client");

        Self { api_key, http, base_url: base_url.into(), count: None }
    }

    /// Cap the number of forecast entries the endpoint returns (`cnt`).
    pub fn with_count(mut self, count: Option<u32>) -> Self {
        self.count = count;
        self
    }
}

#[async_trait]
impl FetchForecast for ForecastClient {
    async fn fetch(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        let mut query = vec![
            ("q".to_string(), city.to_string()),
            ("appid".to_string(), self.api_key.clone()),
            ("units".to_string(), "metric".to_string()),
        ];
        if let Some(count) = self.count {
            query.push(("cnt".to_string(), count.to_string()));
        }

        log::debug!("Requesting forecast for '{city}'");

        let res = self
            .http
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("failed to send forecast request: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read forecast response body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "forecast request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        parse_forecast(&body)
    }
}

/// Decode a forecast body, treating an empty entry list as a failure.
///
/// The projection engine only guarantees a full set of projections for a
/// non-empty list, so absence of entries is rejected here rather than handed
/// downstream as a valid empty projection source.
pub fn parse_forecast(body: &str) -> Result<ForecastResponse, FetchError> {
    let parsed: ForecastResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Decode(format!("failed to parse forecast JSON: {e}")))?;

    if parsed.list.is_empty() {
        return Err(FetchError::Decode(
            "forecast response contained no entries".to_string(),
        ));
    }

    Ok(parsed)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
