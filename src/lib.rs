//! # FunimationLater API Client
//!
//! Async client for the FunimationLater XML catalog API.
//!
//! The client logs a user in, then lists the user's queue and history,
//! pages through the show catalog and runs searches. Every response is XML;
//! the bundled [`HttpTransport`] decodes it into a [`serde_json::Value`] tree
//! and the [`CatalogClient`] turns the listing items into [`Show`] values.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use funimationlater::{CatalogClient, Config};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> funimationlater::Result<()> {
//!     let mut client = CatalogClient::from_config(&Config::default())?;
//!     client.login("user@example.com", "hunter2").await?;
//!
//!     for show in client.get_simulcasts(20, 0).await? {
//!         println!("{}", show.title().unwrap_or("<untitled>"));
//!     }
//!
//!     // Walk the whole catalog without managing offsets
//!     let everything: Vec<_> = client.all_shows().try_collect().await?;
//!     println!("{} shows", everything.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Custom transports
//!
//! Anything implementing [`Transport`] can stand in for the HTTP transport,
//! which is how the client is exercised in tests.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Show, ShowType};
pub use services::catalog::{CatalogClient, ContentQuery, CATALOG_PAGE_LIMIT, DEFAULT_LIMIT};
pub use services::transport::{HttpTransport, Transport};

/// API host
pub const DEFAULT_HOST: &str = "api-funimation.dadcdigital.com";

/// Path prefix of every XML endpoint
pub const DEFAULT_BASE_PATH: &str = "/xml";

/// URL scheme
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default user agent string for requests
pub const DEFAULT_USER_AGENT: &str = concat!("funimationlater/", env!("CARGO_PKG_VERSION"));
