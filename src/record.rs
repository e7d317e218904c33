use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A single structured log event handed to a formatter by the logging
/// framework. The message is already rendered; the formatter never
/// interpolates arguments itself.
///
/// Records are immutable inputs: a formatter reads one, produces a
/// serialized document and does not retain it.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Rendered message text.
    pub message: String,
    /// Creation time as fractional seconds since the Unix epoch.
    pub created: f64,
    /// Severity name, e.g. `INFO`.
    pub level: String,
    /// Logger name.
    pub logger: String,
    /// Source file path of the emitting call site.
    pub pathname: String,
    pub lineno: u32,
    pub process: u32,
    pub thread_name: String,
    pub func_name: String,
    /// Attached exception context, if the event carries one.
    pub exception: Option<ExceptionInfo>,
    /// Caller-supplied key/value attributes.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl LogRecord {
    /// Build a record from the four attributes every event has; the
    /// remaining fields start empty and can be assigned directly.
    pub fn new(
        message: impl Into<String>,
        level: impl Into<String>,
        logger: impl Into<String>,
        pathname: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            created: 0.0,
            level: level.into(),
            logger: logger.into(),
            pathname: pathname.into(),
            lineno: 0,
            process: 0,
            thread_name: String::new(),
            func_name: String::new(),
            exception: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Look up an attribute by its canonical logging name.
    ///
    /// Built-in attributes answer to the names a log-aggregation pipeline
    /// expects (`levelname`, `pathname`, `threadName`, ...); any other name
    /// is resolved against the caller-supplied attribute bag.
    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        match name {
            "message" => Some(AttrValue::Str(self.message.clone())),
            "levelname" => Some(AttrValue::Str(self.level.clone())),
            "name" => Some(AttrValue::Str(self.logger.clone())),
            "pathname" => Some(AttrValue::Str(self.pathname.clone())),
            "lineno" => Some(AttrValue::Int(i64::from(self.lineno))),
            "process" => Some(AttrValue::Int(i64::from(self.process))),
            "threadName" => Some(AttrValue::Str(self.thread_name.clone())),
            "funcName" => Some(AttrValue::Str(self.func_name.clone())),
            "created" => Some(AttrValue::Float(self.created)),
            _ => self.attrs.get(name).cloned(),
        }
    }
}

/// Exception context attached to a record.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionInfo {
    /// Exception class or error type name, e.g. `ValueError`.
    pub exc_type: String,
    /// Exception message, may be empty.
    pub message: String,
    /// Preformatted traceback frame lines, outermost call first.
    pub frames: Vec<String>,
}

impl ExceptionInfo {
    /// Render the full traceback as one multi-line string: the frame lines
    /// followed by `Type: message` on the last line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(frame);
            out.push('\n');
        }
        out.push_str(&self.exc_type);
        if !self.message.is_empty() {
            out.push_str(": ");
            out.push_str(&self.message);
        }
        out
    }
}

/// Closed set of value shapes a record attribute can carry.
///
/// Every variant has a direct JSON representation except [`AttrValue::Other`],
/// which holds the `Debug` rendering of a value that had no structured form.
/// Coercing through [`AttrValue::to_json`] therefore never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Null,
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
    Other(String),
}

impl AttrValue {
    /// Capture an arbitrary value by its `Debug` rendering.
    pub fn other(value: &dyn Debug) -> Self {
        AttrValue::Other(format!("{value:?}"))
    }

    /// Coerce into a `serde_json::Value` that is guaranteed to serialize.
    /// Non-finite floats have no JSON representation and map to null.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Str(s) => Value::String(s.clone()),
            AttrValue::Bool(b) => Value::Bool(*b),
            AttrValue::Int(i) => Value::from(*i),
            AttrValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            AttrValue::Null => Value::Null,
            AttrValue::List(items) => {
                Value::Array(items.iter().map(AttrValue::to_json).collect())
            }
            AttrValue::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            AttrValue::Other(repr) => Value::String(repr.clone()),
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(value: Vec<AttrValue>) -> Self {
        AttrValue::List(value)
    }
}

impl From<BTreeMap<String, AttrValue>> for AttrValue {
    fn from(value: BTreeMap<String, AttrValue>) -> Self {
        AttrValue::Map(value)
    }
}
