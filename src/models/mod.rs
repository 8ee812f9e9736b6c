//! Catalog data model

pub mod show;

pub use show::{Show, ShowType};
