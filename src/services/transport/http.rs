//! HTTP transport for the FunimationLater XML API

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, error};
use url::Url;

use super::{xml, Params, Transport};
use crate::config::Config;
use crate::error::{Error, Result};

/// Longest slice of a response body echoed into debug logs
const LOGGED_BODY_CHARS: usize = 500;

/// reqwest-backed [`Transport`]
///
/// Keeps the session headers handed out at login and sends them with every
/// request. Responses are decoded with [`xml::decode`].
pub struct HttpTransport {
    http: Client,
    base_url: String,
    headers: RwLock<HeaderMap>,
}

impl HttpTransport {
    /// Create a transport for the endpoint described by `config`
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url();
        Url::parse(&base_url)
            .map_err(|e| Error::InvalidConfig(format!("base URL {}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url,
            headers: RwLock::new(HeaderMap::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the headers currently sent with every request
    pub async fn headers(&self) -> HeaderMap {
        self.headers.read().await.clone()
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Value> {
        let headers = self.headers.read().await.clone();

        let response = request
            .headers(headers)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        xml::decode(&text).map_err(|e| {
            error!("Failed to decode response for '{}': {}", path, e);
            debug!(
                "Response text: {}",
                text.chars().take(LOGGED_BODY_CHARS).collect::<String>()
            );
            e
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        let url = build_url(&self.base_url, path, query)?;
        debug!("GET {}", path);
        self.send(self.http.get(url), path).await
    }

    async fn post(&self, path: &str, form: &Params) -> Result<Value> {
        let url = build_url(&self.base_url, path, &[])?;
        debug!("POST {}", path);
        self.send(self.http.post(url).form(form), path).await
    }

    async fn add_headers(&self, headers: HashMap<String, String>) -> Result<()> {
        // Validate everything first so a bad entry leaves the set untouched
        let mut parsed = Vec::with_capacity(headers.len());
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let value = HeaderValue::from_str(&value)?;
            parsed.push((name, value));
        }

        let mut current = self.headers.write().await;
        for (name, value) in parsed {
            current.insert(name, value);
        }
        Ok(())
    }
}

/// Join `path` onto `base_url` with exactly one slash and append the query
pub(crate) fn build_url(base_url: &str, path: &str, query: &Params) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined)
        .map_err(|e| Error::InvalidConfig(format!("invalid URL {}: {}", joined, e)))?;

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "https://foo.bar";

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_build_url_correctly() {
        let url = build_url(HOST, "foobar", &[]).unwrap();
        assert_eq!(url.as_str(), "https://foo.bar/foobar");

        let url = build_url("https://foo.bar/xml/", "/auth/login/", &[]).unwrap();
        assert_eq!(url.as_str(), "https://foo.bar/xml/auth/login/");
    }

    #[test]
    fn test_build_url_with_query_string() {
        let query = pairs(&[("foo", "bar"), ("q", "cowboy bebop & co")]);
        let url = build_url(HOST, "/foobar", &query).unwrap();
        assert_eq!(url.path(), "/foobar");
        assert_eq!(url.query(), Some("foo=bar&q=cowboy+bebop+%26+co"));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config {
            protocol: String::new(),
            ..Config::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_add_headers() {
        let transport = HttpTransport::new(&Config::default()).unwrap();
        assert_eq!(
            transport.base_url(),
            "https://api-funimation.dadcdigital.com/xml"
        );

        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Token abc123".to_string());
        transport.add_headers(headers).await.unwrap();

        let mut more = HashMap::new();
        more.insert("Foo".to_string(), "Bar".to_string());
        transport.add_headers(more).await.unwrap();

        let current = transport.headers().await;
        assert_eq!(current.get("authorization").unwrap(), "Token abc123");
        assert_eq!(current.get("foo").unwrap(), "Bar");
    }

    #[tokio::test]
    async fn test_add_bad_headers() {
        let transport = HttpTransport::new(&Config::default()).unwrap();

        let mut headers = HashMap::new();
        headers.insert("Good".to_string(), "fine".to_string());
        headers.insert("bad header".to_string(), "value".to_string());

        let result = transport.add_headers(headers).await;
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
        assert!(transport.headers().await.is_empty());
    }
}
