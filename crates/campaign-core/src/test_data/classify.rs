//! Structural classification of free-form test data
//!
//! Campaign pre-test and post-test fields hold whatever JSON the editors typed
//! in. `classify` sorts a value into one display shape; it never fails.

use serde::Serialize;
use serde_json::{Map, Value};

/// A label/url pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Generic key/value line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: String,
    pub value: String,
}

/// One element of an array of richer objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestCard {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub reports: Vec<Link>,
    pub fields: Vec<Field>,
}

/// Display shape of a test-data value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "data", rename_all = "snake_case")]
pub enum TestDataView {
    /// Null, empty string, empty array or empty object
    Empty,
    /// A literal text block
    Text(String),
    /// An object made only of `text` and/or `links`
    StructuredNote { text: Option<String>, links: Vec<Link> },
    /// An array whose every element has `label` and `url`
    LinkList(Vec<Link>),
    /// An array of other items, one card each
    Cards(Vec<TestCard>),
    /// Any other object, listed key by key
    RawObject(Vec<Field>),
}

const NOTE_KEYS: [&str; 2] = ["text", "links"];
const TITLE_KEYS: [&str; 3] = ["title", "name", "label"];

/// Classify an arbitrary JSON value
pub fn classify(value: &Value) -> TestDataView {
    match value {
        Value::Null => TestDataView::Empty,
        Value::String(s) if s.trim().is_empty() => TestDataView::Empty,
        Value::String(s) => TestDataView::Text(s.clone()),
        Value::Bool(_) | Value::Number(_) => TestDataView::Text(value.to_string()),
        Value::Object(map) if map.is_empty() => TestDataView::Empty,
        Value::Object(map) if is_structured_note(map) => TestDataView::StructuredNote {
            text: map.get("text").and_then(text_of),
            links: map.get("links").map(links_of).unwrap_or_default(),
        },
        Value::Object(map) => TestDataView::RawObject(fields_of(map, &[])),
        Value::Array(items) if items.is_empty() => TestDataView::Empty,
        Value::Array(items) => match items.iter().map(as_link).collect::<Option<Vec<_>>>() {
            Some(links) => TestDataView::LinkList(links),
            None => TestDataView::Cards(items.iter().map(card_of).collect()),
        },
    }
}

fn is_structured_note(map: &Map<String, Value>) -> bool {
    map.keys().all(|key| NOTE_KEYS.contains(&key.as_str()))
}

/// Text of a scalar; strings unquoted, null and blank strings dropped
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Compact one-line rendering of any value
fn inline_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_link(value: &Value) -> Option<Link> {
    let map = value.as_object()?;
    let label = map.get("label")?;
    let url = map.get("url")?;
    Some(Link {
        label: inline_of(label),
        url: inline_of(url),
    })
}

/// Links from an array (objects or bare URLs) or a single object/string
fn links_of(value: &Value) -> Vec<Link> {
    match value {
        Value::Array(items) => items.iter().filter_map(link_from_item).collect(),
        other => link_from_item(other).into_iter().collect(),
    }
}

fn link_from_item(value: &Value) -> Option<Link> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(Link {
            label: url.clone(),
            url: url.clone(),
        }),
        Value::Object(map) => as_link(value).or_else(|| {
            map.get("url").map(|url| Link {
                label: inline_of(url),
                url: inline_of(url),
            })
        }),
        _ => None,
    }
}

fn fields_of(map: &Map<String, Value>, skip: &[&str]) -> Vec<Field> {
    map.iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .map(|(key, value)| Field {
            key: key.clone(),
            value: inline_of(value),
        })
        .collect()
}

fn card_of(value: &Value) -> TestCard {
    let Some(map) = value.as_object() else {
        return TestCard {
            summary: text_of(value),
            ..TestCard::default()
        };
    };

    let title_key = TITLE_KEYS.into_iter().find(|key| map.contains_key(*key));
    let mut skip = vec!["reports", "summary"];
    skip.extend(title_key);

    TestCard {
        title: title_key.and_then(|key| map.get(key)).and_then(text_of),
        summary: map.get("summary").and_then(text_of),
        reports: map.get("reports").map(links_of).unwrap_or_default(),
        fields: fields_of(map, &skip),
    }
}
