use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

use crate::CoreError;

/// Rendered in place of a binding that has no textual form.
pub const UNCONVERTIBLE: &str = "COULD_NOT_CONVERT_TO_STRING";

const SQL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// A value bound to a `?` placeholder of a query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Binding {
    Text(String),
    Number(serde_json::Number),
    DateTime(NaiveDateTime),
    Unconvertible,
}

impl Binding {
    pub fn render(&self) -> String {
        match self {
            Binding::Text(s) => s.clone(),
            Binding::Number(n) => n.to_string(),
            Binding::DateTime(dt) => dt.format(SQL_DATETIME).to_string(),
            Binding::Unconvertible => UNCONVERTIBLE.to_string(),
        }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Binding::Text(s),
            Value::Number(n) => Binding::Number(n),
            // Booleans and null read the way a database driver stringifies them.
            Value::Bool(true) => Binding::Number(serde_json::Number::from(1u8)),
            Value::Bool(false) | Value::Null => Binding::Text(String::new()),
            Value::Object(ref map) => match map.get("datetime").and_then(Value::as_str) {
                Some(raw) if map.len() == 1 => {
                    parse_datetime(raw).map_or(Binding::Unconvertible, Binding::DateTime)
                }
                _ => Binding::Unconvertible,
            },
            Value::Array(_) => Binding::Unconvertible,
        }
    }
}

impl From<&str> for Binding {
    fn from(s: &str) -> Self {
        Binding::Text(s.to_string())
    }
}

impl From<i64> for Binding {
    fn from(n: i64) -> Self {
        Binding::Number(n.into())
    }
}

impl From<NaiveDateTime> for Binding {
    fn from(dt: NaiveDateTime) -> Self {
        Binding::DateTime(dt)
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, ISO-8601 without offset, or RFC 3339.
/// An offset is dropped after conversion, keeping the wall-clock time it names.
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, CoreError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, SQL_DATETIME)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_local()))
        .map_err(|_| CoreError::InvalidDateTime(raw.to_string()))
}

/// Substitute each binding, single-quoted, into the next `?` of the template.
///
/// Placeholders are consumed left to right from the template only, so a `?`
/// inside an already substituted value is never replaced. Bindings left over
/// once the template runs out of placeholders are dropped.
pub fn interpolate(sql: &str, bindings: &[Binding]) -> String {
    let mut out = String::with_capacity(sql.len() + bindings.len() * 8);
    let mut rest = sql;
    for (i, binding) in bindings.iter().enumerate() {
        let Some(idx) = rest.find('?') else {
            tracing::debug!(
                "{} binding(s) without a placeholder dropped",
                bindings.len() - i
            );
            break;
        };
        if matches!(binding, Binding::Unconvertible) {
            tracing::warn!("binding {} could not be converted to a string", i);
        }
        out.push_str(&rest[..idx]);
        out.push('\'');
        out.push_str(&binding.render());
        out.push('\'');
        rest = &rest[idx + 1..];
    }
    out.push_str(rest);
    out
}
