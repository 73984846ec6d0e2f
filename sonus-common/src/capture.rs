//! Per-probe log capture.
//!
//! A [`CaptureLayer`] installed in the tracing registry mirrors every event
//! emitted inside a span carrying a [`CaptureBuffer`] into that buffer as one
//! logfmt line. Events still reach the regular `fmt` output unchanged, so the
//! buffer is a replayable copy of one probe's trace.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Span, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::{LookupSpan, Registry};

/// Shared, append-only text buffer receiving captured log lines.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    lines: Arc<Mutex<String>>,
    context: Arc<Vec<(String, String)>>,
}

impl CaptureBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer that stamps every captured line with the given fields.
    pub fn with_context<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            lines: Arc::default(),
            context: Arc::new(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Attach this buffer to a span.
    ///
    /// Returns `false` when the span is disabled or its subscriber has no
    /// registry to hold the buffer; events in that span are then not captured.
    pub fn attach(&self, span: &Span) -> bool {
        span.with_subscriber(|(id, dispatch)| {
            let Some(registry) = dispatch.downcast_ref::<Registry>() else {
                return false;
            };
            match registry.span(id) {
                Some(span) => {
                    span.extensions_mut().replace(self.clone());
                    true
                }
                None => false,
            }
        })
        .unwrap_or(false)
    }

    /// Append a raw line. A trailing newline is added.
    pub fn append_line(&self, line: &str) {
        let mut lines = self.lines.lock();
        lines.push_str(line);
        lines.push('\n');
    }

    /// Snapshot of everything captured so far.
    pub fn contents(&self) -> String {
        self.lines.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut line = String::with_capacity(128);

        write!(
            line,
            "ts={} level={} source={}",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            metadata.level().as_str().to_lowercase(),
            metadata.module_path().unwrap_or_else(|| metadata.target()),
        )
        .ok();

        for (key, value) in self.context.iter() {
            push_pair(&mut line, key, value);
        }

        let mut visitor = LogfmtVisitor {
            message: None,
            fields: String::new(),
        };
        event.record(&mut visitor);

        if let Some(message) = visitor.message {
            push_pair(&mut line, "msg", &message);
        }
        line.push_str(&visitor.fields);
        line
    }
}

/// Tracing layer routing events into the nearest enclosing [`CaptureBuffer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureLayer;

impl CaptureLayer {
    pub fn new() -> Self {
        Self
    }

    /// Filter enabling DEBUG and above for the given targets only.
    pub fn targets(targets: &[&str]) -> Targets {
        targets
            .iter()
            .fold(Targets::new(), |acc, target| {
                acc.with_target(*target, Level::DEBUG)
            })
    }
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(scope) = ctx.event_scope(event) else {
            return;
        };

        for span in scope {
            let extensions = span.extensions();
            if let Some(buffer) = extensions.get::<CaptureBuffer>() {
                let line = buffer.format_event(event);
                buffer.append_line(&line);
                return;
            }
        }
    }
}

struct LogfmtVisitor {
    message: Option<String>,
    fields: String,
}

impl Visit for LogfmtVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            push_pair(&mut self.fields, field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            push_pair(&mut self.fields, field.name(), &value);
        }
    }
}

fn push_pair(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push('=');
    if value.is_empty() || value.contains([' ', '=', '"', '\n']) {
        out.push('"');
        for c in value.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                _ => out.push(c),
            }
        }
        out.push('"');
    } else {
        out.push_str(value);
    }
}
