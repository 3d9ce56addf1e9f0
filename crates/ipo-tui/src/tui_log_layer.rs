//! Custom tracing layer that captures logs for TUI display

use {
    std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    },
    tracing::{Event, Level, Subscriber},
    tracing_subscriber::{Layer, layer::Context, registry::LookupSpan},
};

/// Maximum number of lines kept for the log panel
pub const MAX_LOG_LINES: usize = 1000;

/// Shared, bounded buffer of formatted log lines
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: String) {
        // A poisoned lock only means another thread panicked mid-push; the
        // lines themselves are still usable.
        let mut lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.push_back(line);
        while lines.len() > MAX_LOG_LINES {
            lines.pop_front();
        }
    }

    /// Copy of every buffered line, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        let lines = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A tracing layer that formats events as `[LEVEL] message key=value` lines
/// and stores them in a [`LogBuffer`]
pub struct TuiLogLayer {
    logs: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(logs: LogBuffer) -> Self {
        Self { logs }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level_str = match *event.metadata().level() {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN",
            Level::INFO => "INFO",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        };

        let mut visitor = LogVisitor::default();
        event.record(&mut visitor);

        let mut line = format!(
            "{} [{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            level_str,
            visitor.message.trim()
        );
        if visitor.message.is_empty() {
            line.push_str(event.metadata().name());
        }
        for field in &visitor.fields {
            line.push(' ');
            line.push_str(field);
        }

        self.logs.push(line);
    }
}

#[derive(Default)]
struct LogVisitor {
    message: String,
    fields: Vec<String>,
}

impl tracing::field::Visit for LogVisitor {
    // `info!("x {}", y)` records the message as fmt::Arguments, whose Debug
    // output is already the formatted text.
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tracing_subscriber::prelude::*};

    #[test]
    fn captures_formatted_messages_with_level() {
        let logs = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(logs.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Loaded {} IPO records", 42);
            tracing::error!(endpoint = "/api/refresh", "Refresh failed");
        });

        let lines = logs.snapshot();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO] Loaded 42 IPO records"));
        assert!(lines[1].contains("[ERROR] Refresh failed endpoint=/api/refresh"));
        assert_eq!(lines[0].matches("[INFO]").count(), 1);
    }

    #[test]
    fn buffer_is_bounded() {
        let logs = LogBuffer::new();
        for i in 0..(MAX_LOG_LINES + 5) {
            logs.push(format!("line {}", i));
        }
        let lines = logs.snapshot();
        assert_eq!(lines.len(), MAX_LOG_LINES);
        assert_eq!(lines[0], "line 5");
    }
}
