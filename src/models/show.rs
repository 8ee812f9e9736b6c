use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::services::transport::Transport;

/// Catalog partition passed as the `id` of a content query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShowType {
    Simulcasts,
    BroadcastDubs,
    Search,
    Shows,
}

impl ShowType {
    pub const SIMULCAST: &'static str = "simulcasts";
    pub const BROADCAST_DUBS: &'static str = "broadcast-dubs";
    pub const SEARCH: &'static str = "search";
    pub const SHOWS: &'static str = "shows";

    pub fn as_str(&self) -> &'static str {
        match self {
            ShowType::Simulcasts => Self::SIMULCAST,
            ShowType::BroadcastDubs => Self::BROADCAST_DUBS,
            ShowType::Search => Self::SEARCH,
            ShowType::Shows => Self::SHOWS,
        }
    }
}

impl fmt::Display for ShowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::SIMULCAST => Ok(ShowType::Simulcasts),
            Self::BROADCAST_DUBS => Ok(ShowType::BroadcastDubs),
            Self::SEARCH => Ok(ShowType::Search),
            Self::SHOWS => Ok(ShowType::Shows),
            other => Err(format!("unknown show type: {}", other)),
        }
    }
}

/// One catalog title.
///
/// Wraps the decoded `<item>` mapping exactly as the API returned it, plus a
/// handle on the transport that produced it so callers can follow up with
/// detail requests on the same session.
#[derive(Clone)]
pub struct Show {
    data: Map<String, Value>,
    transport: Arc<dyn Transport>,
}

impl Show {
    pub fn new(data: Map<String, Value>, transport: Arc<dyn Transport>) -> Self {
        Self { data, transport }
    }

    /// The raw item mapping
    pub fn raw(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn title(&self) -> Option<&str> {
        self.text_field("title")
    }

    /// Show identifier. Falls back to the `@id` attribute form.
    pub fn id(&self) -> Option<String> {
        ["id", "@id"].iter().find_map(|key| match self.data.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// String value of a field, looking through `#text` when the element
    /// carried attributes.
    fn text_field(&self, name: &str) -> Option<&str> {
        match self.data.get(name)? {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("#text")?.as_str(),
            _ => None,
        }
    }
}

impl fmt::Debug for Show {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Show")
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::mock::MockTransport;
    use serde_json::json;

    fn show(value: Value) -> Show {
        let transport: Arc<dyn Transport> = Arc::new(MockTransport::new());
        match value {
            Value::Object(map) => Show::new(map, transport),
            other => panic!("not a mapping: {other}"),
        }
    }

    #[test]
    fn test_show_type_strings() {
        assert_eq!(ShowType::Simulcasts.as_str(), "simulcasts");
        assert_eq!(ShowType::BroadcastDubs.to_string(), "broadcast-dubs");
        assert_eq!("search".parse::<ShowType>(), Ok(ShowType::Search));
        assert_eq!("shows".parse::<ShowType>(), Ok(ShowType::Shows));
        assert!("genre".parse::<ShowType>().is_err());
    }

    #[test]
    fn test_show_type_serde() {
        assert_eq!(
            serde_json::to_value(ShowType::BroadcastDubs).unwrap(),
            json!("broadcast-dubs")
        );
        let parsed: ShowType = serde_json::from_value(json!("simulcasts")).unwrap();
        assert_eq!(parsed, ShowType::Simulcasts);
    }

    #[test]
    fn test_show_accessors() {
        let s = show(json!({"title": "Cowboy Bebop", "id": "1234", "extra": {"a": "b"}}));
        assert_eq!(s.title(), Some("Cowboy Bebop"));
        assert_eq!(s.id().as_deref(), Some("1234"));
        assert_eq!(s.field("extra"), Some(&json!({"a": "b"})));
        assert!(s.field("missing").is_none());
    }

    #[test]
    fn test_show_title_with_attributes() {
        let s = show(json!({"title": {"@lang": "en", "#text": "Trigun"}, "@id": "77"}));
        assert_eq!(s.title(), Some("Trigun"));
        assert_eq!(s.id().as_deref(), Some("77"));
    }
}
