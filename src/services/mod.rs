//! API integration: transports and the catalog client built on them

pub mod catalog;
pub mod transport;
