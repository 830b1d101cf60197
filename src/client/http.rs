use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{ClientError, DataClient};
use crate::config::Config;

/// `DataClient` backed by reqwest, rooted at the configured base URL.
#[derive(Debug, Clone)]
pub struct HttpDataClient {
    http: Client,
    base_url: String,
}

impl HttpDataClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        let mut builder = Client::builder().user_agent(config.http.user_agent.clone());
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(path: &str, response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} returned status {}", path, status.as_u16());
        Err(ClientError::from_status(path, status.as_u16(), &body))
    }
}

#[async_trait]
impl DataClient for HttpDataClient {
    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        info!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        let response = Self::check_status(path, response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ClientError> {
        info!("POST {}", path);
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::check_status(path, response).await?;
        debug!("POST {} succeeded", path);
        Ok(())
    }
}
