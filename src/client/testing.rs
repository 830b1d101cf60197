//! Recording `DataClient` used by unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ClientError, DataClient};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Post(String, Value),
}

/// Replays scripted responses and records every call made.
///
/// With nothing scripted, GET answers `[]` and POST succeeds.
#[derive(Default)]
pub struct RecordingClient {
    gets: Mutex<VecDeque<Result<Value, ClientError>>>,
    posts: Mutex<VecDeque<Result<(), ClientError>>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(self, reply: Result<Value, ClientError>) -> Self {
        self.gets.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_post(self, reply: Result<(), ClientError>) -> Self {
        self.posts.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Get(_))).count()
    }

    pub fn post_count(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::Post(..))).count()
    }
}

#[async_trait]
impl DataClient for RecordingClient {
    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(Call::Get(path.to_string()));
        self.gets
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Post(path.to_string(), body.clone()));
        self.posts.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// A status error as the HTTP client would report it.
pub fn status_error(path: &str, status_code: u16) -> ClientError {
    ClientError::from_status(path, status_code, "")
}
