//! Catalog API Client
//!
//! Session handling and listing endpoints on top of a [`Transport`].

use async_stream::try_stream;
use futures::Stream;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::normalize::{content_items, watchlist_items, Item};
use super::query::{ContentQuery, CONTENT_PATH};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Show, ShowType};
use crate::services::transport::{HttpTransport, Transport};

/// Page size used when a caller does not pick one
pub const DEFAULT_LIMIT: u32 = 20;

/// Page size of [`CatalogClient::all_shows`]
pub const CATALOG_PAGE_LIMIT: u32 = 20;

const LOGIN_PATH: &str = "/auth/login/";
const QUEUE_PATH: &str = "/myqueue/get-items/";
const HISTORY_PATH: &str = "/history/get-items/";

/// FunimationLater API client
///
/// Queue, history and catalog listings need a logged-in session and fail
/// with [`Error::LoginRequired`] before touching the network otherwise.
/// Search works without one.
///
/// Requests are issued one at a time. A client is not meant to be driven from
/// several tasks at once; `login` takes `&mut self`.
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
    logged_in: bool,
}

impl CatalogClient {
    /// Create a logged-out client on top of `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            logged_in: false,
        }
    }

    /// Create a logged-out client using the HTTP transport
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    /// Create a client and log in when both credentials are given
    pub async fn connect(
        transport: Arc<dyn Transport>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self> {
        let mut client = Self::new(transport);
        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                client.login(username, password).await?;
            }
            _ => debug!("No credentials supplied, starting logged out"),
        }
        Ok(client)
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Log in and install the session headers the service hands back
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let form = [
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let response = self.transport.post(LOGIN_PATH, &form).await?;

        let authentication = match response.get("authentication") {
            Some(Value::Object(authentication)) => authentication,
            _ => return Err(Error::UnknownResponse(response)),
        };
        if authentication.contains_key("error") {
            warn!("Login rejected by the service");
            return Err(Error::AuthenticationFailed);
        }

        let headers = match session_headers(&response) {
            Some(headers) => headers,
            None => return Err(Error::UnknownResponse(response)),
        };
        debug!("Installing {} session header(s)", headers.len());
        self.transport.add_headers(headers).await?;

        self.logged_in = true;
        info!("Logged in to FunimationLater");
        Ok(())
    }

    fn ensure_logged_in(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(Error::LoginRequired)
        }
    }

    // ========================================================================
    // Watchlists
    // ========================================================================

    /// Shows in the current user's queue
    pub async fn get_my_queue(&self) -> Result<Vec<Show>> {
        self.ensure_logged_in()?;
        self.get_watchlist(QUEUE_PATH, "item").await
    }

    /// Shows in the current user's viewing history
    pub async fn get_history(&self) -> Result<Vec<Show>> {
        self.ensure_logged_in()?;
        self.get_watchlist(HISTORY_PATH, "historyitem").await
    }

    async fn get_watchlist(&self, path: &str, entry_key: &str) -> Result<Vec<Show>> {
        let response = self.transport.get(path, &[]).await?;
        let items = watchlist_items(&response, entry_key)?;
        Ok(self.shows(items))
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// One page of a catalog partition.
    ///
    /// `Ok(None)` means the service answered with an empty page.
    pub async fn get_shows(
        &self,
        show_type: ShowType,
        limit: u32,
        offset: u32,
    ) -> Result<Option<Vec<Show>>> {
        self.ensure_logged_in()?;
        self.get_content(&ContentQuery::listing(show_type, limit, offset))
            .await
    }

    /// Search the catalog. `Ok(None)` means nothing matched.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<Show>>> {
        self.get_content(&ContentQuery::search(query)).await
    }

    /// One page of the full show list; an empty page is an empty vector
    pub async fn get_all_shows(&self, limit: u32, offset: u32) -> Result<Vec<Show>> {
        Ok(self
            .get_shows(ShowType::Shows, limit, offset)
            .await?
            .unwrap_or_default())
    }

    /// One page of current simulcasts; an empty page is an empty vector
    pub async fn get_simulcasts(&self, limit: u32, offset: u32) -> Result<Vec<Show>> {
        Ok(self
            .get_shows(ShowType::Simulcasts, limit, offset)
            .await?
            .unwrap_or_default())
    }

    /// Every show in the catalog, fetched [`CATALOG_PAGE_LIMIT`] at a time.
    ///
    /// The walk stops after the first page shorter than the page size. Each
    /// call starts again from offset 0. The first error ends the stream.
    pub fn all_shows(&self) -> impl Stream<Item = Result<Show>> + '_ {
        try_stream! {
            let mut offset = 0;
            loop {
                let page = self.get_all_shows(CATALOG_PAGE_LIMIT, offset).await?;
                let fetched = page.len();
                debug!("Catalog page at offset {}: {} show(s)", offset, fetched);

                for show in page {
                    yield show;
                }

                if fetched < CATALOG_PAGE_LIMIT as usize {
                    break;
                }
                offset += CATALOG_PAGE_LIMIT;
            }
        }
    }

    async fn get_content(&self, query: &ContentQuery) -> Result<Option<Vec<Show>>> {
        let response = self.transport.get(CONTENT_PATH, query.params()).await?;
        Ok(content_items(&response)?.map(|items| self.shows(items)))
    }

    fn shows(&self, items: Vec<&Item>) -> Vec<Show> {
        items
            .into_iter()
            .map(|item| Show::new(item.clone(), Arc::clone(&self.transport)))
            .collect()
    }
}

/// Headers listed under `authentication.parameters.header`
fn session_headers(response: &Value) -> Option<HashMap<String, String>> {
    let header = response
        .get("authentication")?
        .get("parameters")?
        .get("header")?
        .as_object()?;

    let mut headers = HashMap::with_capacity(header.len());
    for (name, value) in header {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            Value::Object(map) => match map.get("#text").and_then(Value::as_str) {
                Some(text) => text.to_string(),
                None => {
                    warn!("Skipping structured session header '{}'", name);
                    continue;
                }
            },
            Value::Array(_) => {
                warn!("Skipping repeated session header '{}'", name);
                continue;
            }
        };
        headers.insert(name.clone(), value);
    }
    Some(headers)
}
