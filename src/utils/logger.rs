use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Collects event fields as JSON values, keyed by field name.
#[derive(Default)]
struct FieldCollector(Map<String, Value>);

impl FieldCollector {
    fn put(&mut self, field: &Field, value: impl Into<Value>) {
        self.0.insert(field.name().to_string(), value.into());
    }
}

macro_rules! record_as_json {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(&mut self, field: &Field, value: $ty) {
                self.put(field, value);
            }
        )*
    };
}

impl Visit for FieldCollector {
    record_as_json!(record_i64: i64, record_u64: u64, record_bool: bool, record_f64: f64, record_str: &str);

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }
}

/// Fields logged as `event_name` or `event_domain` are published under their
/// dotted semantic-convention names.
fn promote_event_fields(attributes: &mut Map<String, Value>) {
    for (from, to) in [("event_name", "event.name"), ("event_domain", "event.domain")] {
        if let Some(v) = attributes.remove(from) {
            attributes.insert(to.to_string(), v);
        }
    }
}

fn severity_number(level: &Level) -> u64 {
    match *level {
        Level::TRACE => 1,
        Level::DEBUG => 5,
        Level::INFO => 9,
        Level::WARN => 13,
        Level::ERROR => 17,
    }
}

/// One log line in the OpenTelemetry log data model.
struct LogRecord<'a> {
    level: &'a Level,
    body: String,
    attributes: Map<String, Value>,
}

impl<'a> LogRecord<'a> {
    /// Splits the `message` field out as the body; events without one use `fallback_body`.
    fn new(level: &'a Level, mut attributes: Map<String, Value>, fallback_body: &str) -> Self {
        promote_event_fields(&mut attributes);
        let body = match attributes.remove("message") {
            Some(Value::String(message)) => message,
            _ => fallback_body.to_string(),
        };
        LogRecord {
            level,
            body,
            attributes,
        }
    }

    fn to_json(&self, timestamp: &str, resource: &Value) -> Value {
        json!({
            "timestamp": timestamp,
            "severity_text": self.level.as_str(),
            "severity_number": severity_number(self.level),
            "body": self.body,
            "resource": resource,
            "attributes": self.attributes,
        })
    }
}

/// Writes each event as a single JSON line.
#[derive(Clone)]
struct JsonLineFormatter {
    resource: Value,
}

impl JsonLineFormatter {
    fn new(config: &LoggingConfig) -> Self {
        JsonLineFormatter {
            resource: json!({
                "service.name": config.service_name,
                "service.version": config.service_version,
            }),
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonLineFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let mut record = LogRecord::new(metadata.level(), collector.0, metadata.name());
        let code = [
            ("code.filepath", metadata.file().map(Value::from)),
            ("code.lineno", metadata.line().map(Value::from)),
            ("code.target", Some(Value::from(metadata.target()))),
        ];
        for (key, value) in code {
            if let Some(value) = value {
                record.attributes.insert(key.to_string(), value);
            }
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let line = record.to_json(&timestamp, &self.resource);
        let serialized = serde_json::to_string(&line).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", serialized)
    }
}

/// Parses a `logging.level` value.
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(format!(
            "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
            level
        )),
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` directives, when set,
/// are applied on top of the configured level.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), String> {
    let level_filter = parse_level(&logging_config.level)?;
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let result = match logging_config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().event_format(JsonLineFormatter::new(logging_config)))
            .try_init(),
        LogFormat::Console => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().pretty())
            .try_init(),
    };
    result.map_err(|e| format!("Failed to initialise logging: {}", e))
}
