//! XML response decoding
//!
//! Turns an API response body into a [`Value`] tree:
//!
//! ```text
//! <foo><bar bang="foo">fiz</bar></foo>   =>   {"foo": {"bar": {"@bang": "foo", "#text": "fiz"}}}
//! ```
//!
//! - attributes become `@name` keys
//! - text next to attributes or child elements goes under `#text`
//! - an element with only text is that text; an empty element is `null`
//! - a child that repeats becomes an array, a child that appears once does not

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// An element whose closing tag has not been read yet
struct OpenElement {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut fields = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
            let key = format!("@{}", String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value()?.into_owned();
            fields.insert(key, Value::String(value));
        }

        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn into_value(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.fields.is_empty() {
            if text.is_empty() {
                Value::Null
            } else {
                Value::String(text.to_string())
            }
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                fields.insert("#text".to_string(), Value::String(text.to_string()));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

/// Add a child under `name`, promoting to an array on the second occurrence
fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Decode an XML document into `{root_name: root_value}`
pub fn decode(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let closed = match reader.read_event()? {
            Event::Start(start) => {
                stack.push(OpenElement::open(&start)?);
                None
            }
            Event::Empty(start) => Some(OpenElement::open(&start)?),
            Event::End(_) => Some(
                stack
                    .pop()
                    .ok_or_else(|| Error::Parse("unexpected closing tag".to_string()))?,
            ),
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape()?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
                None
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => None,
        };

        if let Some(element) = closed {
            let (name, value) = element.into_value();
            match stack.last_mut() {
                Some(parent) => insert_child(&mut parent.fields, name, value),
                None if root.is_none() => root = Some((name, value)),
                None => return Err(Error::Parse("multiple root elements".to_string())),
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::Parse(format!("unclosed element <{}>", open.name)));
    }

    let (name, value) =
        root.ok_or_else(|| Error::Parse("document has no root element".to_string()))?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}
