//! In-memory transport for tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{Params, Transport};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Get { path: String, query: Vec<(String, String)> },
    Post { path: String, form: Vec<(String, String)> },
    AddHeaders(HashMap<String, String>),
}

/// Replays canned responses in order and records every call
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<Call>>,
    headers: Mutex<HashMap<String, String>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_responses(responses: impl IntoIterator<Item = Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    pub(crate) fn push_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of requests sent, not counting header updates
    pub(crate) fn request_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| !matches!(call, Call::AddHeaders(_)))
            .count()
    }

    pub(crate) fn headers(&self) -> HashMap<String, String> {
        self.headers.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<Value> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Network("no canned response left".to_string()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        self.calls.lock().unwrap().push(Call::Get {
            path: path.to_string(),
            query: query.to_vec(),
        });
        self.next_response()
    }

    async fn post(&self, path: &str, form: &Params) -> Result<Value> {
        self.calls.lock().unwrap().push(Call::Post {
            path: path.to_string(),
            form: form.to_vec(),
        });
        self.next_response()
    }

    async fn add_headers(&self, headers: HashMap<String, String>) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::AddHeaders(headers.clone()));
        self.headers.lock().unwrap().extend(headers);
        Ok(())
    }
}
