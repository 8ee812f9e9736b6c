//! FunimationLater catalog client
//!
//! # Overview
//!
//! - **Session**: log in once; the service answers with the headers that
//!   authenticate every later request
//! - **Listings**: queue, history, simulcasts, broadcast dubs, the full show
//!   list and search, all returned as [`Show`](crate::Show) values
//! - **Catalog walk**: [`CatalogClient::all_shows`] pages through the whole
//!   catalog as a stream
//!
//! # Usage
//!
//! ```rust,ignore
//! use funimationlater::services::catalog::CatalogClient;
//!
//! let mut client = CatalogClient::from_config(&config)?;
//! client.login(&username, &password).await?;
//! let queue = client.get_my_queue().await?;
//! ```

pub mod client;
pub mod normalize;
pub mod query;

pub use client::{CatalogClient, CATALOG_PAGE_LIMIT, DEFAULT_LIMIT};
pub use query::ContentQuery;
