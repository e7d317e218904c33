use logstash_format::fields::AttrSpec;
use logstash_format::formatter::{FormatterConfig, LogstashFormatterV0, LogstashFormatterV1};
use logstash_format::record::{AttrValue, ExceptionInfo, LogRecord};
use serde_json::{json, Value};

fn sample_record() -> LogRecord {
    let mut record = LogRecord::new("hello", "INFO", "app", "/x.py");
    record.created = 1700000000.123;
    record.lineno = 42;
    record.process = 4242;
    record.thread_name = "main".to_string();
    record.func_name = "handler".to_string();
    record
}

fn sample_config() -> FormatterConfig {
    FormatterConfig {
        tags: vec!["a".to_string()],
        ..FormatterConfig::default()
    }
}

fn parse(bytes: &[u8]) -> Value {
    let text = std::str::from_utf8(bytes).expect("output must be UTF-8");
    serde_json::from_str(text).expect("output must be valid JSON")
}

#[test]
fn version0_layout() {
    let formatter = LogstashFormatterV0::with_host(sample_config(), "h1");
    let doc = parse(&formatter.format(&sample_record()).unwrap());

    assert_eq!(doc["@timestamp"], json!("2023-11-14T22:13:20.123Z"));
    assert_eq!(doc["@message"], json!("hello"));
    assert_eq!(doc["@source"], json!("Logstash://h1//x.py"));
    assert_eq!(doc["@source_host"], json!("h1"));
    assert_eq!(doc["@source_path"], json!("/x.py"));
    assert_eq!(doc["@tags"], json!(["a"]));
    assert_eq!(doc["@type"], json!("Logstash"));

    let fields = &doc["@fields"];
    assert_eq!(fields["levelname"], json!("INFO"));
    assert_eq!(fields["logger"], json!("app"));
    assert_eq!(fields["message"], json!("hello"));
    assert_eq!(fields["path"], json!("/x.py"));
}

#[test]
fn version1_layout() {
    let formatter = LogstashFormatterV1::with_host(sample_config(), "h1");
    let doc = parse(&formatter.format(&sample_record()).unwrap());

    assert_eq!(doc["@timestamp"], json!("2023-11-14T22:13:20.123Z"));
    assert_eq!(doc["@version"], json!("1"));
    assert_eq!(doc["host"], json!("h1"));
    assert_eq!(doc["tags"], json!(["a"]));
    assert_eq!(doc["type"], json!("Logstash"));
    assert_eq!(doc["message"], json!("hello"));
    assert_eq!(doc["level"], json!("INFO"));
    assert_eq!(doc["logger_name"], json!("app"));
    assert_eq!(doc["path"], json!("/x.py"));
}

#[test]
fn unknown_attributes_never_appear() {
    let mut record = sample_record();
    record
        .attrs
        .insert("secret".to_string(), AttrValue::from("hunter2"));

    let formatter = LogstashFormatterV1::with_host(sample_config(), "h1");
    let bytes = formatter.format(&record).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(!text.contains("secret"));
    assert!(!text.contains("hunter2"));
}

#[test]
fn caller_attributes_appear_when_mapped() {
    let mut record = sample_record();
    record
        .attrs
        .insert("request_id".to_string(), AttrValue::from("abc-123"));

    let config = FormatterConfig {
        log_attrs: AttrSpec::new([("message", "message"), ("request_id", "request_id")]),
        ..sample_config()
    };
    let formatter = LogstashFormatterV1::with_host(config, "h1");
    let doc = parse(&formatter.format(&record).unwrap());
    assert_eq!(doc["request_id"], json!("abc-123"));
}

#[test]
fn extra_fields_override_extracted_fields() {
    let mut extra = serde_json::Map::new();
    extra.insert("path".to_string(), json!("/override.py"));
    extra.insert("env".to_string(), json!("prod"));

    let config = FormatterConfig {
        extra_fields: extra,
        ..sample_config()
    };
    let formatter = LogstashFormatterV1::with_host(config, "h1");
    let doc = parse(&formatter.format(&sample_record()).unwrap());

    assert_eq!(doc["path"], json!("/override.py"));
    assert_eq!(doc["env"], json!("prod"));
}

#[test]
fn exception_adds_stack_trace() {
    let mut record = sample_record();
    record.exception = Some(ExceptionInfo {
        exc_type: "ValueError".to_string(),
        message: "boom".to_string(),
        frames: vec!["  File \"/x.py\", line 42, in handler".to_string()],
    });

    let formatter = LogstashFormatterV1::with_host(sample_config(), "h1");
    let doc = parse(&formatter.format(&record).unwrap());

    let trace = doc["stack_trace"].as_str().unwrap();
    assert!(!trace.is_empty());
    assert!(trace.contains("ValueError"));
    assert_eq!(doc["lineno"], json!(42));
    assert_eq!(doc["process"], json!(4242));
    assert_eq!(doc["thread_name"], json!("main"));
}

#[test]
fn no_exception_means_no_debug_fields() {
    let formatter = LogstashFormatterV1::with_host(sample_config(), "h1");
    let doc = parse(&formatter.format(&sample_record()).unwrap());

    assert!(doc.get("stack_trace").is_none());
    assert!(doc.get("lineno").is_none());
}

#[test]
fn version0_nests_debug_fields_under_fields() {
    let mut record = sample_record();
    record.exception = Some(ExceptionInfo {
        exc_type: "ValueError".to_string(),
        message: "boom".to_string(),
        frames: Vec::new(),
    });

    let formatter = LogstashFormatterV0::with_host(sample_config(), "h1");
    let doc = parse(&formatter.format(&record).unwrap());

    assert!(doc["@fields"]["stack_trace"]
        .as_str()
        .unwrap()
        .contains("ValueError"));
    assert_eq!(doc["@fields"]["lineno"], json!(42));
}

#[test]
fn configured_mapping_wins_over_debug_fields() {
    let mut record = sample_record();
    record
        .attrs
        .insert("custom_line".to_string(), AttrValue::from(7_i64));
    record.exception = Some(ExceptionInfo {
        exc_type: "ValueError".to_string(),
        message: String::new(),
        frames: Vec::new(),
    });

    let config = FormatterConfig {
        log_attrs: AttrSpec::new([("message", "message"), ("custom_line", "lineno")]),
        ..sample_config()
    };
    let formatter = LogstashFormatterV1::with_host(config, "h1");
    let doc = parse(&formatter.format(&record).unwrap());

    // The mapped attribute survives; the record's own line number does not.
    assert_eq!(doc["lineno"], json!(7));
}

#[test]
fn identical_configuration_yields_identical_bytes() {
    let record = sample_record();
    let a = LogstashFormatterV1::with_host(sample_config(), "h1");
    let b = LogstashFormatterV1::with_host(sample_config(), "h1");

    assert_eq!(a.format(&record).unwrap(), b.format(&record).unwrap());

    let a0 = LogstashFormatterV0::with_host(sample_config(), "h1");
    let b0 = LogstashFormatterV0::with_host(sample_config(), "h1");
    assert_eq!(a0.format(&record).unwrap(), b0.format(&record).unwrap());
}

#[test]
fn tags_preserve_order_and_repeats() {
    let config = FormatterConfig {
        tags: vec!["b".to_string(), "a".to_string(), "b".to_string()],
        ..FormatterConfig::default()
    };
    let formatter = LogstashFormatterV1::with_host(config, "h1");
    let doc = parse(&formatter.format(&sample_record()).unwrap());
    assert_eq!(doc["tags"], json!(["b", "a", "b"]));
}
