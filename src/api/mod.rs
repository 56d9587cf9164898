mod client;
mod error;
pub mod resource;

pub use client::Client;
pub use error::ApiError;
pub use resource::{CampaignPayload, RemoteCampaign};

use log::*;
use reqwest::Method;

const CAMPAIGNS_PATH: &str = "/api/campaigns";

/// Responsible for asynchronous interaction with the campaigns API.
///
pub struct CampaignApi {
    client: Client,
}

impl CampaignApi {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Result<CampaignApi, ApiError> {
        debug!("Initializing campaigns API client for {}...", base_url);
        Ok(CampaignApi {
            client: Client::new(access_token, base_url)?,
        })
    }

    /// Fetch the campaign record with the given id.
    ///
    pub async fn campaign(&self, id: &str) -> Result<RemoteCampaign, ApiError> {
        debug!("Requesting campaign {}...", id);
        self.client
            .get_json(&format!("{}/{}", CAMPAIGNS_PATH, id))
            .await
    }

    /// Create a draft when `id` is `None`, otherwise update the existing one.
    ///
    pub async fn save_draft(
        &self,
        id: Option<&str>,
        payload: &CampaignPayload,
    ) -> Result<RemoteCampaign, ApiError> {
        self.submit(id, "draft", payload).await
    }

    /// Submit the campaign for review, creating it first when `id` is `None`.
    ///
    pub async fn publish(
        &self,
        id: Option<&str>,
        payload: &CampaignPayload,
    ) -> Result<RemoteCampaign, ApiError> {
        self.submit(id, "publish", payload).await
    }

    async fn submit(
        &self,
        id: Option<&str>,
        action: &str,
        payload: &CampaignPayload,
    ) -> Result<RemoteCampaign, ApiError> {
        let (method, path) = match id {
            Some(id) => (Method::PUT, format!("{}/{}/{}", CAMPAIGNS_PATH, id, action)),
            None => (Method::POST, format!("{}/{}", CAMPAIGNS_PATH, action)),
        };
        debug!("Submitting campaign {} via {} {}...", action, method, path);
        self.client.send_json(method, &path, payload).await
    }
}
