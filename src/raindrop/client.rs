// Raindrop.io API HTTP client.
// Handles authentication, timeouts, and request/response processing.

use std::time::Duration;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{RaindropError, Result};

pub const RAINDROP_API_BASE: &str = "https://api.raindrop.io";

/// Raindrop.io API client bound to a single bearer token.
pub struct RaindropClient {
    client: Client,
    base_url: String,
}

impl RaindropClient {
    /// Create a new client for `base_url` with the given token.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RaindropError::Other(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("raindrop-random/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(RaindropError::Api)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config.token.as_deref().ok_or(RaindropError::MissingToken)?;
        Self::new(&config.api_base, token, config.request_timeout)
    }

    /// Make a GET request to the Raindrop.io API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).send().await.map_err(RaindropError::Api)?;

        self.check_response(response).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(RaindropError::Api)?;

        self.check_response(response).await
    }

    /// Read a response body and decode it as JSON.
    ///
    /// The body is read as text first so that a malformed payload surfaces as
    /// a JSON error rather than a transport error.
    pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(RaindropError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(RaindropError::NotFound(url))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let reset_at = response
                    .headers()
                    .get("x-ratelimit-reset")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<i64>().ok())
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(RaindropError::RateLimited { reset_at })
            }
            status => Err(RaindropError::Http {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
