//! HTTP access to the back-office REST API
//!
//! `DataClient` is the seam between screens and the network: the real
//! implementation is `HttpDataClient`, tests substitute a recording double.

pub mod errors;
pub mod http;

#[cfg(test)]
pub mod testing;

pub use errors::ClientError;
pub use http::HttpDataClient;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// GET/POST access to the API. Success is judged by HTTP status alone.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// GET `path` and parse the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, ClientError>;

    /// POST `body` as JSON to `path`. The response body is not consumed.
    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ClientError>;
}

/// Fetch a collection and decode it into entities, preserving server order.
pub async fn fetch_list<E: DeserializeOwned>(
    client: &dyn DataClient,
    path: &str,
) -> Result<Vec<E>, ClientError> {
    let value = client.get_json(path).await?;
    serde_json::from_value(value).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}
