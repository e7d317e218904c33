use crate::record::{ExceptionInfo, LogRecord};
use serde_json::{Map, Value};

/// Ordered mapping from record attribute names to output field names.
///
/// This is an allow-list: only attributes named here are copied into the
/// output document, each under its destination name. Destination names are
/// expected to be unique; if they are not, the last pair wins.
#[derive(Debug, Clone)]
pub struct AttrSpec {
    pairs: Vec<(String, String)>,
}

impl AttrSpec {
    /// Build a spec from `(source, destination)` pairs.
    pub fn new<S, D>(pairs: impl IntoIterator<Item = (S, D)>) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(source, dest)| (source.into(), dest.into()))
                .collect(),
        }
    }

    /// Iterate over `(source, destination)` pairs in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(source, dest)| (source.as_str(), dest.as_str()))
    }

    /// Destination field names in configured order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, dest)| dest.as_str())
    }
}

impl Default for AttrSpec {
    fn default() -> Self {
        AttrSpec::new([
            ("message", "message"),
            ("pathname", "path"),
            ("levelname", "level"),
            ("name", "logger_name"),
        ])
    }
}

/// Copy the record attributes named in `spec` into a field mapping, coerced
/// to JSON-safe values. Missing source attributes are skipped silently.
pub fn extract_fields(record: &LogRecord, spec: &AttrSpec) -> Map<String, Value> {
    let mut fields = Map::new();
    for (source, dest) in spec.iter() {
        if let Some(value) = record.attr(source) {
            fields.insert(dest.to_string(), value.to_json());
        }
    }
    fields
}

/// Exception-context fields added when a record carries exception info:
/// the rendered `stack_trace` plus line, process and thread identifiers.
///
/// Keys that collide with a destination name in `spec` are dropped before
/// returning, so the configured attribute mapping always wins over the
/// automatic debug fields.
pub fn extract_debug_fields(record: &LogRecord, spec: &AttrSpec) -> Map<String, Value> {
    let stack_trace = record
        .exception
        .as_ref()
        .map(ExceptionInfo::render)
        .unwrap_or_default();

    let mut fields = Map::new();
    fields.insert("stack_trace".to_string(), Value::String(stack_trace));
    fields.insert("lineno".to_string(), Value::from(record.lineno));
    fields.insert("process".to_string(), Value::from(record.process));
    fields.insert(
        "thread_name".to_string(),
        Value::String(record.thread_name.clone()),
    );

    for dest in spec.destinations() {
        fields.remove(dest);
    }
    fields
}
