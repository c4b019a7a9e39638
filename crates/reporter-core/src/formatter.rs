use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use reporter_style::{Styler, Tag};
use serde_json::Value;

use crate::binding::interpolate;
use crate::record::{
    CommandInfo, DiagnosticRecord, ExceptionInfo, LogMessage, NamedTimer, Query, RequestInfo,
};
use crate::wrap::{format_number, indent_break, number_format, pad, wordwrap, PAD, WIDTH};

/// Width of the horizontal rule opening every report.
pub const RULE_WIDTH: usize = 72;

/// `n/j/y g:i:s A`, e.g. `1/2/24 3:04:05 AM`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%y %-I:%M:%S %p";

const LABEL: &[Tag] = &[Tag::Bold, Tag::Grey];
const VALUE: &[Tag] = &[Tag::Cyan];
const KEY: &[Tag] = &[Tag::Grey];

const ERROR_LEVELS: &[&str] = &["error", "critical", "alert", "emergency"];

pub trait Formatter {
    fn format(&self, record: &DiagnosticRecord) -> String;

    /// Format each record independently, preserving order.
    fn format_batch(&self, records: &[DiagnosticRecord]) -> Vec<String> {
        records.iter().map(|record| self.format(record)).collect()
    }
}

/// Renders a [`DiagnosticRecord`] as a fixed-layout block of labelled lines.
pub struct RecordFormatter {
    base_path: PathBuf,
    styler: Box<dyn Styler>,
}

impl RecordFormatter {
    pub fn new(base_path: impl Into<PathBuf>, styler: Box<dyn Styler>) -> Self {
        Self {
            base_path: base_path.into(),
            styler,
        }
    }

    /// Exception paths are shown relative to the base path when they live under it.
    fn relative_path<'a>(&self, file: &'a str) -> Cow<'a, str> {
        match Path::new(file).strip_prefix(&self.base_path) {
            Ok(rel) => Cow::Owned(rel.to_string_lossy().into_owned()),
            Err(_) => Cow::Borrowed(file),
        }
    }
}

impl Formatter for RecordFormatter {
    fn format(&self, record: &DiagnosticRecord) -> String {
        let at = record
            .logged_at
            .unwrap_or_else(|| Local::now().naive_local());
        let mut report = Report::new(self.styler.as_ref());

        report.header(at);
        if let Some(request) = record
            .request
            .as_ref()
            .filter(|r| !r.http_method.is_empty() && !r.url.is_empty())
        {
            report.request(request);
        }
        if let Some(command) = record
            .command
            .as_ref()
            .filter(|c| !c.command_line.is_empty())
        {
            report.command(command);
        }
        report.timer(record.timing.elapsed_ms, &record.timers);
        let memory = format!(
            "{} (PEAK: {})",
            record.memory.current, record.memory.peak
        );
        report.label("MEMORY", &memory);
        if !record.input.is_empty() {
            report.input(&record.input);
        }
        if !record.queries.is_empty() {
            report.database(&record.queries);
        }
        if !record.logs.is_empty() {
            report.logs(&record.logs);
        }
        if let Some(exception) = record
            .exception
            .as_ref()
            .filter(|e| !e.message.is_empty() || !e.file.is_empty())
        {
            report.exception(exception, &self.relative_path(&exception.file));
        }
        report.add("");

        tracing::debug!(
            queries = record.queries.len(),
            logs = record.logs.len(),
            "formatted record"
        );
        report.finish()
    }

    fn format_batch(&self, records: &[DiagnosticRecord]) -> Vec<String> {
        tracing::debug!("formatting batch of {} records", records.len());
        records.iter().map(|record| self.format(record)).collect()
    }
}

/// Output buffer for one report. Created per call and consumed by [`Report::finish`].
struct Report<'s> {
    styler: &'s dyn Styler,
    lines: Vec<String>,
}

impl<'s> Report<'s> {
    fn new(styler: &'s dyn Styler) -> Self {
        Self {
            styler,
            lines: Vec::new(),
        }
    }

    fn add(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn style(&self, tags: &[Tag], text: &str) -> String {
        self.styler.style(tags, text)
    }

    /// `LABEL:    value`, label column padded to [`PAD`].
    fn label(&mut self, label: &str, value: &str) {
        let line = format!(
            "{}{}",
            self.style(LABEL, &pad(&format!("{label}:"), PAD)),
            self.style(&[Tag::Magenta], value)
        );
        self.add(line);
    }

    /// `  key: value` with the key column sized to `width`.
    fn keyed(&mut self, key: &str, width: usize, value: &str) {
        let line = format!(
            "{}{}",
            self.style(KEY, &pad(&format!("  {key}: "), width)),
            self.style(VALUE, value)
        );
        self.add(line);
    }

    fn header(&mut self, at: NaiveDateTime) {
        self.add("");
        let rule = self.style(KEY, &"-".repeat(RULE_WIDTH));
        self.add(rule);
        let stamp = self.style(KEY, &at.format(TIMESTAMP_FORMAT).to_string());
        self.add(stamp);
        self.add("");
    }

    fn request(&mut self, request: &RequestInfo) {
        let mut flags = Vec::new();
        if request.http_method != "GET" {
            flags.push(request.http_method.as_str());
        }
        if request.is_ajax {
            flags.push("XHR");
        }
        let mut value = wrap(&request.url);
        if !flags.is_empty() {
            value.push_str(&format!(" ({})", flags.join(",")));
        }
        self.label("REQUEST", &value);
    }

    fn command(&mut self, command: &CommandInfo) {
        self.label("ARTISAN", &wrap(&command.command_line));
    }

    fn timer(&mut self, elapsed_ms: f64, timers: &[NamedTimer]) {
        self.label("TIME", &format!("{}ms", format_number(elapsed_ms)));
        if timers.is_empty() {
            return;
        }
        self.label("TIMERS", "");
        let width = key_width(timers.iter().map(|t| t.name.as_str()));
        for timer in timers {
            self.keyed(
                &timer.name,
                width,
                &format!("{}ms", format_number(timer.elapsed_ms)),
            );
        }
    }

    fn input(&mut self, fields: &[(String, Value)]) {
        self.label("INPUT", "");
        let width = key_width(fields.iter().map(|(k, _)| k.as_str()));
        let brk = indent_break(width);
        for (key, value) in fields {
            let text = value_text(value);
            self.keyed(key, width, &wordwrap(&text, WIDTH, &brk, true));
        }
    }

    fn database(&mut self, queries: &[Query]) {
        self.label("SQL", &format!("{} queries", queries.len()));
        for query in queries {
            let sql = interpolate(&query.sql, &query.bindings);
            let line = format!(
                "{}{}",
                self.style(KEY, &format!("  ({}) ", format_duration(&query.duration))),
                self.style(VALUE, &wordwrap(&sql, WIDTH, &indent_break(PAD), false))
            );
            self.add(line);
        }
    }

    fn logs(&mut self, logs: &[LogMessage]) {
        self.add("");
        for log in logs {
            let color = if ERROR_LEVELS.contains(&log.level.to_lowercase().as_str()) {
                Tag::Red
            } else {
                Tag::Yellow
            };
            let line = format!(
                "{}{}",
                self.style(LABEL, &pad(&format!("{}:", log.level.to_uppercase()), PAD)),
                self.style(&[color], &wrap(&log.message))
            );
            self.add(line);

            if let Some(context) = log.context.as_ref().filter(|c| !is_blank(c)) {
                let pretty = match context {
                    Value::String(s) => s.trim().to_string(),
                    other => format!("{other:#}"),
                };
                let indented = format!("  {}", pretty.replace('\n', "\n  "));
                let line = self.style(KEY, &indented);
                self.add(line);
            }
        }
    }

    fn exception(&mut self, exception: &ExceptionInfo, file: &str) {
        self.add("");
        let mut message = exception.message.clone();
        if !file.is_empty() {
            message.push_str(&format!(" in {file}"));
        }
        if exception.line > 0 {
            message.push_str(&format!(" on line {}", exception.line));
        }
        let line = format!(
            "{}{}",
            self.style(&[Tag::Bold, Tag::Red], &pad("ERROR:", PAD)),
            self.style(&[Tag::Red], &wrap(&message))
        );
        self.add(line);
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Hard wrap under the label column.
fn wrap(text: &str) -> String {
    wordwrap(text, WIDTH, &indent_break(PAD), true)
}

/// Key column: longest key plus room for the indent and `: `.
fn key_width<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.map(|k| k.chars().count() + 4).max().unwrap_or(0)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Durations above 1000 read as seconds, everything else as milliseconds.
/// Only digits and `.` of the raw value are considered.
pub fn format_duration(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = digits.parse::<f64>().unwrap_or(0.0);
    if value > 1000.0 {
        format!("{} s", number_format(value / 1000.0, 2))
    } else {
        format!("{} ms", number_format(value, 2))
    }
}
