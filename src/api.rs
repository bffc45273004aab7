//! Backend HTTP client.
//!
//! Requests carry the session cookie the backend sets at login, the same
//! way a browser sends credentials to its own origin.

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;

/// Cookie-carrying client rooted at the backend base URL
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a backend path and decode the JSON body
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.json()?)
    }
}
