use crate::error::SerializationError;
use crate::fields::{extract_debug_fields, extract_fields, AttrSpec};
use crate::record::LogRecord;
use crate::time::format_timestamp;
use serde_json::{Map, Value};

/// Construction-time configuration shared by both schema versions.
///
/// **Fields**
/// - `message_type`: label placed in the `type`/`@type` field and the
///   `@source` URI, defaults to `"Logstash"`.
/// - `tags`: ordered tag list attached to every document, may repeat.
/// - `fqdn`: if `true`, keep the full node name as the host identifier;
///   otherwise use the portion before the first dot.
/// - `log_attrs`: [`AttrSpec`] selecting which record attributes appear in
///   the output and under what name.
/// - `extra_fields`: static fields merged into every document, overriding
///   extracted fields on key collision.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    pub message_type: String,
    pub tags: Vec<String>,
    pub fqdn: bool,
    pub log_attrs: AttrSpec,
    pub extra_fields: Map<String, Value>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            message_type: "Logstash".to_string(),
            tags: Vec::new(),
            fqdn: false,
            log_attrs: AttrSpec::default(),
            extra_fields: Map::new(),
        }
    }
}

/// Configuration plus the host identifier resolved once at construction.
/// Both formatter versions defer their shared merge logic here.
#[derive(Debug, Clone)]
struct FormatterBase {
    config: FormatterConfig,
    host: String,
}

impl FormatterBase {
    fn new(config: FormatterConfig) -> Self {
        let host = resolve_host(config.fqdn);
        Self { config, host }
    }

    fn with_host(config: FormatterConfig, host: String) -> Self {
        Self { config, host }
    }

    /// Merge extracted fields, static extra fields and (when an exception
    /// is attached) debug fields into `doc`, in that order. Later merges
    /// overwrite earlier keys.
    fn merge_record_fields(&self, doc: &mut Map<String, Value>, record: &LogRecord) {
        for (key, value) in extract_fields(record, &self.config.log_attrs) {
            doc.insert(key, value);
        }
        for (key, value) in &self.config.extra_fields {
            doc.insert(key.clone(), value.clone());
        }
        if record.exception.is_some() {
            for (key, value) in extract_debug_fields(record, &self.config.log_attrs) {
                doc.insert(key, value);
            }
        }
    }

    fn source(&self, path: &str) -> String {
        format_source(&self.config.message_type, &self.host, path)
    }
}

/// Compose the `@source` URI of the version-0 layout.
pub fn format_source(message_type: &str, host: &str, path: &str) -> String {
    format!("{message_type}://{host}/{path}")
}

fn resolve_host(fqdn: bool) -> String {
    let name = match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(err) => {
            tracing::warn!(%err, "failed to resolve hostname, using \"localhost\"");
            return "localhost".to_string();
        }
    };
    if fqdn {
        name
    } else {
        short_name(&name).to_string()
    }
}

fn short_name(name: &str) -> &str {
    match name.split('.').next() {
        Some(short) if !short.is_empty() => short,
        _ => name,
    }
}

fn serialize(document: &Map<String, Value>) -> Result<Vec<u8>, SerializationError> {
    Ok(serde_json::to_vec(document)?)
}

/// Legacy version-0 schema: envelope fields prefixed with `@`, record
/// fields nested under `@fields`.
#[derive(Debug, Clone)]
pub struct LogstashFormatterV0 {
    base: FormatterBase,
}

impl LogstashFormatterV0 {
    /// Construct a formatter, resolving the host identifier from the OS
    /// according to `config.fqdn`.
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            base: FormatterBase::new(config),
        }
    }

    /// Construct with an explicit host identifier instead of resolving one.
    pub fn with_host(config: FormatterConfig, host: impl Into<String>) -> Self {
        Self {
            base: FormatterBase::with_host(config, host.into()),
        }
    }

    /// Host identifier cached at construction.
    pub fn host(&self) -> &str {
        &self.base.host
    }

    /// Format one record as a UTF-8 JSON byte sequence.
    pub fn format(&self, record: &LogRecord) -> Result<Vec<u8>, SerializationError> {
        let base = &self.base;

        let mut fields = Map::new();
        fields.insert(
            "levelname".to_string(),
            Value::String(record.level.clone()),
        );
        fields.insert("logger".to_string(), Value::String(record.logger.clone()));
        base.merge_record_fields(&mut fields, record);

        let mut message = Map::new();
        message.insert(
            "@timestamp".to_string(),
            Value::String(format_timestamp(record.created)),
        );
        message.insert(
            "@message".to_string(),
            Value::String(record.message.clone()),
        );
        message.insert(
            "@source".to_string(),
            Value::String(base.source(&record.pathname)),
        );
        message.insert(
            "@source_host".to_string(),
            Value::String(base.host.clone()),
        );
        message.insert(
            "@source_path".to_string(),
            Value::String(record.pathname.clone()),
        );
        message.insert("@tags".to_string(), Value::from(base.config.tags.clone()));
        message.insert(
            "@type".to_string(),
            Value::String(base.config.message_type.clone()),
        );
        message.insert("@fields".to_string(), Value::Object(fields));

        serialize(&message)
    }
}

/// Current version-1 schema: a flat document with record fields merged at
/// the top level.
#[derive(Debug, Clone)]
pub struct LogstashFormatterV1 {
    base: FormatterBase,
}

impl LogstashFormatterV1 {
    /// Construct a formatter, resolving the host identifier from the OS
    /// according to `config.fqdn`.
    pub fn new(config: FormatterConfig) -> Self {
        Self {
            base: FormatterBase::new(config),
        }
    }

    /// Construct with an explicit host identifier instead of resolving one.
    pub fn with_host(config: FormatterConfig, host: impl Into<String>) -> Self {
        Self {
            base: FormatterBase::with_host(config, host.into()),
        }
    }

    /// Host identifier cached at construction.
    pub fn host(&self) -> &str {
        &self.base.host
    }

    /// Format one record as a UTF-8 JSON byte sequence.
    pub fn format(&self, record: &LogRecord) -> Result<Vec<u8>, SerializationError> {
        let base = &self.base;

        let mut message = Map::new();
        message.insert(
            "@timestamp".to_string(),
            Value::String(format_timestamp(record.created)),
        );
        message.insert("@version".to_string(), Value::String("1".to_string()));
        message.insert("host".to_string(), Value::String(base.host.clone()));
        message.insert("tags".to_string(), Value::from(base.config.tags.clone()));
        message.insert(
            "type".to_string(),
            Value::String(base.config.message_type.clone()),
        );
        base.merge_record_fields(&mut message, record);

        serialize(&message)
    }
}
