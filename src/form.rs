//! Coercion of loosely typed form fields.
//!
//! Clients may post either JSON numbers or strings. A missing or blank field
//! means "leave as is"; anything present must parse or the request fails.

use std::borrow::Cow;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Number(n) => Cow::Owned(n.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Parses `raw` with `parse`, yielding `None` for an absent or blank field.
pub fn coerce<T>(
    field: &'static str,
    raw: Option<&RawValue>,
    parse: impl Fn(&str) -> Option<T>,
) -> AppResult<Option<T>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let text = raw.as_text();
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    parse(text)
        .map(Some)
        .ok_or_else(|| AppError::validation(format!("invalid value for {field}: {text:?}")))
}

pub fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_int<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.parse::<T>().ok()
}
