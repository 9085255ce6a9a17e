use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants::GEO_JSON;
use crate::models::{AlertResponse, ForecastResponse, PointsResponse};

/// Why an upstream weather request produced no usable data
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Stateless client for the National Weather Service API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Creates a client that identifies itself with `user_agent`
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response.
    ///
    /// Every failure is logged here; callers only decide what to tell the user.
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        self.fetch_request(url, self.client.get(url)).await
    }

    async fn fetch_request<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let result = Self::try_fetch(url, request).await;
        if let Err(e) = &result {
            tracing::error!("Error making NWS request: {}", e);
        }
        result
    }

    async fn try_fetch<T: DeserializeOwned>(
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.json::<T>().await.map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Active alerts for an already normalized region code; the code is sent percent-encoded
    pub async fn alerts(&self, state: &str) -> Result<AlertResponse, UpstreamError> {
        let url = self.alerts_url();
        let request = self.client.get(&url).query(&[("area", state)]);
        self.fetch_request(&url, request).await
    }

    /// Grid point metadata for a coordinate
    pub async fn grid_point(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<PointsResponse, UpstreamError> {
        self.fetch(&self.points_url(latitude, longitude)).await
    }

    /// Forecast resource named by a grid point
    pub async fn forecast(&self, url: &str) -> Result<ForecastResponse, UpstreamError> {
        self.fetch(url).await
    }

    fn alerts_url(&self) -> String {
        format!("{}/alerts", self.base_url)
    }

    fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{:.4},{:.4}", self.base_url, latitude, longitude)
    }
}
