//! HTTP client for campaigns API requests.
//!
//! This module provides a low-level HTTP client wrapper for making JSON
//! requests to the campaigns API, handling authentication, error bodies and
//! response parsing.

use super::error::ApiError;
use super::resource::ErrorBody;
use log::*;
use reqwest::{Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};

/// Makes requests to the campaigns API and tries to conform response data to
/// the requested type.
///
pub struct Client {
    pub(crate) access_token: Option<String>,
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(access_token: Option<&str>, base_url: &str) -> Result<Self, ApiError> {
        Ok(Client {
            access_token: access_token.map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::builder().build()?,
        })
    }

    /// GET the path and parse the JSON response.
    ///
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .call_with_body::<serde_json::Value>(Method::GET, path, None)
            .await?;
        Client::parse(response).await
    }

    /// Send a JSON body with the given method and parse the JSON response.
    ///
    pub async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.call_with_body(method, path, Some(body)).await?;
        Client::parse(response).await
    }

    /// Resolve a path against the base URL.
    ///
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidEndpoint(path.to_string()));
        }
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Make request with optional body and return the raw response.
    ///
    pub(crate) async fn call_with_body<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http_client.request(method, url);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Turn a response into the requested type, or into a status error that
    /// carries the server's `message` when one was returned.
    ///
    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_default();
            error!(
                "API request failed with status {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize API response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            ApiError::from(e)
        })
    }
}
