//! Errors raised while talking to the back-office API

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status_code} for {path}")]
    Status {
        path: String,
        status_code: u16,
        /// Value of the `error` key when the body was `{"error": "..."}`
        server_message: Option<String>,
    },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Build a status error, pulling the server's `error` message out of the body if present.
    pub fn from_status(path: &str, status_code: u16, body: &str) -> Self {
        let server_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty());

        ClientError::Status {
            path: path.to_string(),
            status_code,
            server_message,
        }
    }

    /// Message shown to the user on a screen's error line.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Http(e) => e.to_string(),
            ClientError::Status { server_message: Some(message), .. } => message.clone(),
            ClientError::Status { .. } | ClientError::Decode { .. } => fallback.to_string(),
            ClientError::InvalidBaseUrl { .. } => self.to_string(),
        }
    }
}
