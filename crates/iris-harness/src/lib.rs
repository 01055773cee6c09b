#![forbid(unsafe_code)]

//! Test harness for Iris.
//!
//! - [`Harness`] wraps a [`Session`] on a [`HeadlessHost`] with shortcuts for
//!   the checks lifecycle scenarios repeat.
//! - [`capture_events`] runs a closure under a scoped subscriber and returns
//!   every `tracing` event it emitted, so tests can assert on warnings.
//! - [`log_jsonl`] prints one JSON line per check for CI artifact review.
//!
//! Set `IRIS_LOG=debug` to also echo events to stderr while capturing.

use std::sync::{Arc, Mutex};

use iris_backend::{DialogId, HeadlessHost, MountedDialog};
use iris_dialog::{DialogOptions, DialogState, Session, SessionConfig};
use iris_i18n::Catalog;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Headless session plus assertion helpers.
pub struct Harness {
    pub session: Session<HeadlessHost>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Session with the built-in catalog and default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            session: Session::with_config(HeadlessHost::new(), Catalog::builtin(), config),
        }
    }

    /// Show a titled, minimizable dialog.
    pub fn show_minimizable(&mut self, title: &str) -> DialogId {
        self.session.show(
            DialogOptions::new()
                .title(title)
                .message(format!("<p>{title}</p>"))
                .minimizable(true),
        )
    }

    pub fn host(&self) -> &HeadlessHost {
        self.session.host()
    }

    pub fn host_mut(&mut self) -> &mut HeadlessHost {
        self.session.host_mut()
    }

    pub fn mounted(&self, id: DialogId) -> Option<&MountedDialog> {
        self.session.host().dialog(id)
    }

    pub fn state(&self, id: DialogId) -> Option<DialogState> {
        self.session.state(id)
    }

    /// Badge count of the rendered tray, 0 when no tray is rendered.
    pub fn tray_badge(&self) -> usize {
        self.host().tray().map_or(0, |t| t.view.count())
    }

    /// Check the page-wide invariants that must hold after every transition.
    ///
    /// Panics with a description of the first violation.
    pub fn assert_consistent(&self) {
        let s = &self.session;
        let expected_lock = !s.registry().is_empty() || !s.tray().is_empty();
        assert_eq!(s.is_scroll_locked(), expected_lock, "scroll lock out of step");
        assert_eq!(
            s.host().is_scroll_locked(),
            expected_lock,
            "host scroll lock out of step"
        );

        let layers: Vec<_> = s.registry().ids().filter_map(|id| s.layer(id)).collect();
        assert!(
            layers.windows(2).all(|w| w[0] < w[1]),
            "layers not strictly increasing: {layers:?}"
        );

        for &id in s.tray().entries() {
            assert!(s.registry().contains(id), "{id} in tray but not registry");
            assert_eq!(s.state(id), Some(DialogState::Minimized), "{id} in tray");
        }
        for id in s.registry().ids() {
            let state = s.state(id);
            let minimized = state == Some(DialogState::Minimized);
            assert_eq!(minimized, s.tray().contains(id), "{id} tray membership");
            let mounted = s.host().dialog(id);
            assert!(mounted.is_some(), "{id} registered but not mounted");
            assert_eq!(
                mounted.map(|m| m.visible),
                Some(!minimized),
                "{id} visibility"
            );
        }
        assert_eq!(
            s.host().tray().is_some(),
            !s.tray().is_empty(),
            "tray rendering out of step"
        );
    }
}

/// One captured `tracing` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        let captured = CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Run `f` with a scoped subscriber and return its result plus every event
/// emitted meanwhile.
pub fn capture_events<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let echo = std::env::var("IRIS_LOG").ok().map(|filter| {
        tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_filter(EnvFilter::new(filter))
    });
    let subscriber = tracing_subscriber::registry().with(layer).with(echo);
    let result = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().map(|e| e.clone()).unwrap_or_default();
    (result, captured)
}

/// Events at `WARN`.
pub fn warnings(events: &[CapturedEvent]) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.level == Level::WARN).collect()
}

/// Emit a JSONL log entry (for CI artifact review).
pub fn log_jsonl(test: &str, check: &str, passed: bool, notes: &str) {
    let line = serde_json::json!({
        "test": test,
        "check": check,
        "passed": passed,
        "notes": notes,
    });
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_warning_fields() {
        let ((), events) = capture_events(|| {
            tracing::warn!(dialog = "dialog-1", "minimize rejected");
            tracing::debug!("noise");
        });
        let warns = warnings(&events);
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].message, "minimize rejected");
        assert_eq!(warns[0].field("dialog"), Some("dialog-1"));
    }

    #[test]
    fn fresh_harness_is_consistent() {
        let mut h = Harness::new();
        h.assert_consistent();
        let a = h.show_minimizable("A");
        h.assert_consistent();
        assert_eq!(h.state(a), Some(DialogState::Shown));
        assert_eq!(h.tray_badge(), 0);
    }
}
