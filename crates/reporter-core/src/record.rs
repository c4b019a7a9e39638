use chrono::NaiveDateTime;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::binding::{parse_datetime, Binding};
use crate::ordered;

/// Everything known about one request or command run.
///
/// `timing` and `memory` are always present; every other section is optional
/// and simply left out of the report when absent or empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawRecord")]
pub struct DiagnosticRecord {
    /// When the record was produced. The local clock is used when absent.
    pub logged_at: Option<NaiveDateTime>,
    pub request: Option<RequestInfo>,
    pub command: Option<CommandInfo>,
    pub timing: Timing,
    pub timers: Vec<NamedTimer>,
    pub memory: MemoryUsage,
    pub input: Vec<(String, Value)>,
    pub queries: Vec<Query>,
    pub logs: Vec<LogMessage>,
    pub exception: Option<ExceptionInfo>,
}

impl DiagnosticRecord {
    pub fn new(elapsed_ms: f64, memory: MemoryUsage) -> Self {
        Self {
            logged_at: None,
            request: None,
            command: None,
            timing: Timing { elapsed_ms },
            timers: Vec::new(),
            memory,
            input: Vec::new(),
            queries: Vec::new(),
            logs: Vec::new(),
            exception: None,
        }
    }
}

/// A request block is only rendered when both method and url are non-empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestInfo {
    #[serde(default, rename = "method")]
    pub http_method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "ajax")]
    pub is_ajax: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CommandInfo {
    pub command_line: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Timing {
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedTimer {
    pub name: String,
    pub elapsed_ms: f64,
}

/// Human-readable sizes such as `2MB`, formatted by the producer.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryUsage {
    pub current: String,
    pub peak: String,
}

impl MemoryUsage {
    pub fn new(current: impl Into<String>, peak: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            peak: peak.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Query {
    #[serde(rename = "query")]
    pub sql: String,
    #[serde(default)]
    pub bindings: Vec<Binding>,
    /// Raw duration as reported by the database layer, e.g. `"1.52"` or `"1.52ms"`.
    #[serde(default, rename = "time", deserialize_with = "text")]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogMessage {
    pub level: String,
    #[serde(deserialize_with = "text")]
    pub message: String,
    #[serde(default)]
    pub context: Option<Value>,
}

/// Missing fields decode as empty; the formatter leaves out what is blank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExceptionInfo {
    #[serde(deserialize_with = "text")]
    pub message: String,
    pub file: String,
    pub line: u32,
}

#[derive(Deserialize)]
struct TimerEntry {
    elapsed: f64,
}

/// Wire shape of a record: the flat field vocabulary of the logging pipeline.
#[derive(Deserialize)]
struct RawRecord {
    #[serde(default, deserialize_with = "optional_datetime")]
    datetime: Option<NaiveDateTime>,
    #[serde(default)]
    request: Option<RequestInfo>,
    #[serde(default)]
    command: Option<CommandInfo>,
    time: f64,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    timers: Vec<(String, TimerEntry)>,
    #[serde(deserialize_with = "text")]
    memory_usage: String,
    #[serde(deserialize_with = "text")]
    memory_peak_usage: String,
    #[serde(default, deserialize_with = "ordered::deserialize")]
    input: Vec<(String, Value)>,
    #[serde(default)]
    database: Option<Vec<Query>>,
    #[serde(default)]
    logs: Option<Vec<LogMessage>>,
    #[serde(default)]
    exception: Option<ExceptionInfo>,
}

impl From<RawRecord> for DiagnosticRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            logged_at: raw.datetime,
            request: raw.request,
            command: raw.command,
            timing: Timing {
                elapsed_ms: raw.time,
            },
            timers: raw
                .timers
                .into_iter()
                .map(|(name, t)| NamedTimer {
                    name,
                    elapsed_ms: t.elapsed,
                })
                .collect(),
            memory: MemoryUsage::new(raw.memory_usage, raw.memory_peak_usage),
            input: raw.input,
            queries: raw.database.unwrap_or_default(),
            logs: raw.logs.unwrap_or_default(),
            exception: raw.exception,
        }
    }
}

/// Strings pass through; any other JSON value is kept in its encoded form.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn optional_datetime<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_datetime(&raw).map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}
