//! Shape normalization for decoded responses
//!
//! The XML decoder cannot tell a one-element list from a single element, so
//! any list-like field may arrive as a mapping, an array of mappings, or an
//! empty marker (`null` / a bare string). Everything that reads a list goes
//! through [`one_or_many`].

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub type Item = Map<String, Value>;

/// View a field that may be a single value or an array as a slice of values.
/// `null` is an empty list.
pub fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        Value::Null => Vec::new(),
        single => vec![single],
    }
}

fn unknown(response: &Value) -> Error {
    Error::UnknownResponse(response.clone())
}

/// Items of a longlist content page.
///
/// `Ok(None)` when the page is empty (`items` decoded as a scalar, `null` or
/// an empty placeholder). A response without `items`, or with a populated
/// `items` lacking `item`, is an [`Error::UnknownResponse`].
pub fn content_items(response: &Value) -> Result<Option<Vec<&Item>>> {
    let items = match response.get("items") {
        Some(Value::Object(items)) => items,
        Some(_) => return Ok(None),
        None => return Err(unknown(response)),
    };

    let entries = items.get("item").ok_or_else(|| unknown(response))?;
    one_or_many(entries)
        .into_iter()
        .map(|entry| entry.as_object().ok_or_else(|| unknown(response)))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Items of a queue or history response.
///
/// Entries live at `watchlist.items.<entry_key>` and wrap the show mapping
/// in a nested `item`. An empty watchlist yields an empty list.
pub fn watchlist_items<'a>(response: &'a Value, entry_key: &str) -> Result<Vec<&'a Item>> {
    let watchlist = response.get("watchlist").ok_or_else(|| unknown(response))?;

    let entries = match watchlist.get("items").and_then(|items| items.get(entry_key)) {
        Some(entries) => one_or_many(entries),
        None => return Ok(Vec::new()),
    };

    entries
        .into_iter()
        .map(|entry| {
            entry
                .get("item")
                .and_then(Value::as_object)
                .ok_or_else(|| unknown(response))
        })
        .collect()
}
