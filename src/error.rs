use thiserror::Error;

/// Returned when a finished document cannot be encoded as JSON.
///
/// Extracted record attributes are coerced to JSON-safe values before they
/// reach serialization, so in practice this only fires for values a caller
/// placed directly into static configuration such as `extra_fields`. The
/// formatter never retries; the logging framework decides how to react.
#[derive(Debug, Error)]
#[error("failed to serialize log document: {0}")]
pub struct SerializationError(#[from] serde_json::Error);
