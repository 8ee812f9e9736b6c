//! Parameters for the longlist content endpoint

use crate::models::ShowType;
use crate::services::transport::Params;

/// Endpoint behind every catalog listing and search
pub const CONTENT_PATH: &str = "/longlist/content/page/";

const SORT: &str = "start_timestamp";
const SORT_DIRECTION: &str = "desc";
const ITEM_THEMES: &str = "dateAddedShow";
const TERRITORY: &str = "US";
const ROLE: &str = "g";

/// Query string for one page of `/longlist/content/page/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    params: Vec<(String, String)>,
}

impl ContentQuery {
    /// One page of a catalog partition, newest first
    pub fn listing(show_type: ShowType, limit: u32, offset: u32) -> Self {
        let mut query = Self::sorted(show_type.as_str());
        query.push("territory", TERRITORY);
        query.push("role", ROLE);
        query.push("offset", offset.to_string());
        query.push("limit", limit.to_string());
        query
    }

    /// Free-text search. The service pages search results itself.
    pub fn search(text: &str) -> Self {
        let mut query = Self::sorted(ShowType::Search.as_str());
        query.push("q", text);
        query
    }

    fn sorted(id: &str) -> Self {
        let mut query = Self { params: Vec::new() };
        query.push("id", id);
        query.push("sort", SORT);
        query.push("sort_direction", SORT_DIRECTION);
        query.push("itemThemes", ITEM_THEMES);
        query
    }

    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.params.push((key.to_string(), value.into()));
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_params() {
        let query = ContentQuery::listing(ShowType::Simulcasts, 20, 40);

        assert_eq!(query.get("id"), Some("simulcasts"));
        assert_eq!(query.get("sort"), Some("start_timestamp"));
        assert_eq!(query.get("sort_direction"), Some("desc"));
        assert_eq!(query.get("itemThemes"), Some("dateAddedShow"));
        assert_eq!(query.get("territory"), Some("US"));
        assert_eq!(query.get("role"), Some("g"));
        assert_eq!(query.get("offset"), Some("40"));
        assert_eq!(query.get("limit"), Some("20"));
        assert_eq!(query.get("q"), None);
        assert_eq!(query.params().len(), 8);
    }

    #[test]
    fn test_search_params() {
        let query = ContentQuery::search("one piece");

        assert_eq!(query.get("id"), Some("search"));
        assert_eq!(query.get("q"), Some("one piece"));
        assert_eq!(query.get("sort"), Some("start_timestamp"));
        assert_eq!(query.get("itemThemes"), Some("dateAddedShow"));
        assert_eq!(query.get("offset"), None);
        assert_eq!(query.get("limit"), None);
        assert_eq!(query.get("territory"), None);
    }
}
