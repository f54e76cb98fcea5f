//! In-memory event capture for logging assertions
//!
//! [`init_test_capture`] installs a global registry with a
//! [`TestCaptureLayer`] the first time it is called and hands out clones of
//! the same [`TestCapture`] afterwards. Tests in one binary share the
//! buffer, so assertions should filter on something unique to the test
//! (an op name, a field value) rather than count every event.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use telic_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};

/// One recorded event, with every field rendered as a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field(FIELD_OP)
    }

    pub fn event(&self) -> Option<&str> {
        self.field(FIELD_EVENT)
    }

    pub fn component(&self) -> Option<&str> {
        self.field(FIELD_COMPONENT)
    }

    /// Whether this is the `event` boundary of `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl FieldRecorder {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    /// Create a layer and the handle that reads what it records
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                events: Arc::clone(&events),
            },
            TestCapture { events },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            fields: recorder.0,
        };

        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Read handle over captured events
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events emitted for `op`, in order
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// Most recent `event` boundary of `op`
    pub fn last(&self, op: &str, event: &str) -> Option<CapturedEvent> {
        self.events().into_iter().rev().find(|e| e.is(op, event))
    }

    /// Count events matching `predicate`
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that `op` emitted an `event` boundary
    ///
    /// # Panics
    ///
    /// Panics if no such event was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no op={} event={} among {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer globally (once) and return a handle to it.
///
/// If a different global subscriber is already installed the returned
/// handle never sees any events.
///
/// # Example
///
/// ```
/// use telic_core::logging_facility::test_capture::init_test_capture;
/// use telic_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_example");
/// capture.assert_event_exists("doc_capture_example", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).try_init().ok();
            capture
        })
        .clone()
}
