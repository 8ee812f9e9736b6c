//! Transport layer
//!
//! The catalog client never talks HTTP itself. It goes through a
//! [`Transport`], which sends the request, keeps the session headers and
//! hands back the response body decoded from XML into a [`Value`] tree.
//!
//! # Decoded shape
//!
//! The XML decoder collapses cardinality: an element that appears once is a
//! single value, one that repeats is an array, and an empty element is
//! `null`. Callers reading list-like fields must be ready for all three.

pub mod http;
pub mod xml;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::Result;

pub use http::HttpTransport;

/// Ordered `key=value` pairs for a query string or form body
pub type Params = [(String, String)];

/// What the catalog client needs from an HTTP layer.
///
/// Implementations are shared as `Arc<dyn Transport>` between the client and
/// every [`Show`](crate::Show) it produces, so header state lives behind
/// interior mutability.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` with the given query string
    async fn get(&self, path: &str, query: &Params) -> Result<Value>;

    /// POST `path` with a form-encoded body
    async fn post(&self, path: &str, form: &Params) -> Result<Value>;

    /// Merge headers into the set sent with every later request
    async fn add_headers(&self, headers: HashMap<String, String>) -> Result<()>;
}
