//! Tolerant scalar decoding for externally-sourced résumé payloads.
//!
//! The backend serializes the same concept as a string in one place and a
//! number in another (`"graduationYear": 2024` vs `"2024"`), so leaf values
//! accept any JSON scalar. Blank strings and `null` count as absent. Arrays or
//! objects where text is expected are a shape error.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// Converts a JSON scalar to display text. `Ok(None)` means "absent".
fn scalar_to_text(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(if s.trim().is_empty() { None } else { Some(s) }),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) => Err("expected text, found an array".to_string()),
        Value::Object(_) => Err("expected text, found an object".to_string()),
    }
}

/// `deserialize_with` helper for optional text fields.
/// Pair with `#[serde(default)]` so a missing key is also `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_text(value).map_err(D::Error::custom)
}

/// An ordered sequence of text items. Blank and `null` items are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextList(pub Vec<String>);

impl<'de> Deserialize<'de> for TextList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(TextList::default()),
            Value::Array(values) => values,
            other => {
                return Err(D::Error::custom(format!(
                    "expected a list of text, found {}",
                    kind_of(&other)
                )))
            }
        };

        let mut items = Vec::with_capacity(values.len());
        for value in values {
            if let Some(text) = scalar_to_text(value).map_err(D::Error::custom)? {
                items.push(text);
            }
        }
        Ok(TextList(items))
    }
}

/// Content that arrives either as a bullet list or a single paragraph,
/// e.g. `achievements` / `highlights`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lines {
    Bullets(Vec<String>),
    Paragraph(String),
}

impl Lines {
    /// Collapses empty forms to `None` so callers can fall through to alternates.
    pub fn non_empty(self) -> Option<Lines> {
        match self {
            Lines::Bullets(items) if items.is_empty() => None,
            other => Some(other),
        }
    }

    /// Flattens to a single line, joining list items with `", "`.
    pub fn joined(self) -> Option<String> {
        match self {
            Lines::Bullets(items) if items.is_empty() => None,
            Lines::Bullets(items) => Some(items.join(", ")),
            Lines::Paragraph(text) => Some(text),
        }
    }
}

/// `deserialize_with` helper for fields that may be a list or a single string.
pub fn opt_lines<'de, D>(deserializer: D) -> Result<Option<Lines>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => {
            let TextList(items) = TextList::deserialize(Value::Array(values))
                .map_err(D::Error::custom)?;
            Ok(Some(Lines::Bullets(items)))
        }
        scalar => Ok(scalar_to_text(scalar)
            .map_err(D::Error::custom)?
            .map(Lines::Paragraph)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
