// Logging module - optional capture of tracing output onto the screen
//
// A custom tracing layer formats each event into a single line and hands it
// to a `LogHook`. The hook is a switch: while a sender is installed, lines
// flow over an mpsc channel to the UI loop, which appends them to the
// terminal buffer. While nothing is installed the layer is inert.
//
// Lines never touch the buffer directly. The layer can fire from any thread;
// the buffer belongs to the UI loop.

use chrono::{DateTime, Local};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Longest captured line in bytes (the device formats into a 256-byte buffer)
pub const MAX_LINE_BYTES: usize = 255;

/// Capacity of the capture channel; overflowing lines are dropped
pub const CAPTURE_CHANNEL_SIZE: usize = 256;

/// Redirection switch shared between the tracing layer and the screen
#[derive(Clone, Default)]
pub struct LogHook {
    sink: Arc<Mutex<Option<mpsc::Sender<String>>>>,
}

impl LogHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start forwarding lines to `sender`, replacing any previous target
    pub fn install(&self, sender: mpsc::Sender<String>) {
        if let Ok(mut sink) = self.sink.lock() {
            *sink = Some(sender);
        }
    }

    /// Stop forwarding; no-op when nothing is installed
    pub fn uninstall(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            *sink = None;
        }
    }

    pub fn is_installed(&self) -> bool {
        self.sink.lock().map(|sink| sink.is_some()).unwrap_or(false)
    }

    fn forward(&self, line: String) {
        if let Ok(sink) = self.sink.lock() {
            if let Some(sender) = sink.as_ref() {
                // try_send: a full or closed channel must never stall logging
                let _ = sender.try_send(line);
            }
        }
    }
}

/// Hook plus the sender it should be pointed at
///
/// Handed to the terminal view so it can switch capture on at create and
/// off at destroy.
#[derive(Clone)]
pub struct LogCapture {
    hook: LogHook,
    sender: mpsc::Sender<String>,
}

impl LogCapture {
    pub fn new(hook: LogHook, sender: mpsc::Sender<String>) -> Self {
        Self { hook, sender }
    }

    pub fn install(&self) {
        self.hook.install(self.sender.clone());
    }

    pub fn uninstall(&self) {
        self.hook.uninstall();
    }
}

/// Tracing layer that forwards formatted events through a `LogHook`
pub struct ScreenLogLayer {
    hook: LogHook,
}

impl ScreenLogLayer {
    pub fn new(hook: LogHook) -> Self {
        Self { hook }
    }
}

impl<S> Layer<S> for ScreenLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if !self.hook.is_installed() {
            return;
        }

        let mut message = String::new();
        let mut visitor = MessageVisitor(&mut message);
        event.record(&mut visitor);

        let line = format_line(Local::now(), event.metadata().level(), &message);
        self.hook.forward(line);
    }

    fn enabled(&self, _metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        // Filtering happens at subscriber level
        true
    }
}

/// Format a captured event as one screen line, capped at `MAX_LINE_BYTES`
pub fn format_line(timestamp: DateTime<Local>, level: &Level, message: &str) -> String {
    let mut line = format!(
        "[{}] {:5} {}",
        timestamp.format("%H:%M:%S"),
        level.as_str(),
        message.trim_end()
    );
    truncate_at_boundary(&mut line, MAX_LINE_BYTES);
    line
}

fn truncate_at_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// Visitor to extract the message from a tracing event
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture_with(hook: &LogHook, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(ScreenLogLayer::new(hook.clone()));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_hook_install_and_uninstall() {
        let hook = LogHook::new();
        assert!(!hook.is_installed());

        let (tx, _rx) = mpsc::channel(4);
        hook.install(tx);
        assert!(hook.is_installed());

        hook.uninstall();
        hook.uninstall();
        assert!(!hook.is_installed());
    }

    #[test]
    fn test_layer_forwards_only_while_installed() {
        let hook = LogHook::new();
        let (tx, mut rx) = mpsc::channel(16);

        capture_with(&hook, || tracing::info!("before install"));
        assert!(rx.try_recv().is_err());

        hook.install(tx);
        capture_with(&hook, || tracing::warn!("channel hopping on {}", 6));
        let line = rx.try_recv().expect("line forwarded");
        assert!(line.ends_with("WARN  channel hopping on 6"), "got {line:?}");

        hook.uninstall();
        capture_with(&hook, || tracing::info!("after uninstall"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_full_channel_drops_lines() {
        let hook = LogHook::new();
        let (tx, mut rx) = mpsc::channel(1);
        hook.install(tx);

        capture_with(&hook, || {
            tracing::info!("one");
            tracing::info!("two");
        });

        assert!(rx.try_recv().expect("first line").ends_with("one"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_format_line_caps_length() {
        let message = "é".repeat(400);
        let line = format_line(Local::now(), &Level::INFO, &message);

        assert!(line.len() <= MAX_LINE_BYTES);
        assert!(line.starts_with('['));
        assert!(line.contains("INFO "));
    }

    #[test]
    fn test_format_line_strips_trailing_newline() {
        let line = format_line(Local::now(), &Level::ERROR, "scan failed\n");
        assert!(line.ends_with("ERROR scan failed"));
    }
}
