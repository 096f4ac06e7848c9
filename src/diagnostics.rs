//! Trace hooks for observing recomputation and render decisions.

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Diagnostic events emitted by a named consumer.
///
/// The first render after mounting emits only [`ChildRendered`]; the change
/// events start firing once there is a previous cycle to compare against.
///
/// [`ChildRendered`]: TraceEvent::ChildRendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// The consumer was handed a selector with a different identity.
    SelectorChanged,
    /// The consumer observed a different state snapshot.
    SnapshotChanged,
    /// The derived slice was recomputed into a new allocation.
    DerivedChanged,
    /// The render callback handle has a different identity.
    RenderFnChanged,
    /// The render callback actually ran (the memoized skip did not apply).
    ChildRendered,
}

/// Sink for trace events.
///
/// Observers are strictly observational: they receive a copy of what already
/// happened and can neither change a derived value nor a render decision.
/// Running the same scenario with the observer detached produces identical
/// rendered output.
pub trait Observer: Send + Sync {
    /// Record one event from the consumer with the given diagnostic name.
    fn trace(&self, consumer: &str, event: TraceEvent);
}

/// Observer that discards every event.
pub struct NullObserver;

impl Observer for NullObserver {
    fn trace(&self, _consumer: &str, _event: TraceEvent) {}
}

static NULL: NullObserver = NullObserver;

/// A consumer's tracing context: its diagnostic name (if any) plus the
/// observer to deliver to.
///
/// Events only flow when a name is present, so unnamed consumers trace
/// nothing no matter which observer is installed.
pub struct Trace<'a> {
    name: Option<&'a str>,
    observer: &'a dyn Observer,
}

impl<'a> Trace<'a> {
    /// Tracing context for a named consumer.
    pub fn named(name: &'a str, observer: &'a dyn Observer) -> Self {
        Self {
            name: Some(name),
            observer,
        }
    }

    /// Context that emits nothing.
    pub fn disabled() -> Trace<'static> {
        Trace {
            name: None,
            observer: &NULL,
        }
    }

    /// Deliver `event` if this context carries a name.
    pub fn emit(&self, event: TraceEvent) {
        if let Some(name) = self.name {
            self.observer.trace(name, event);
        }
    }
}

#[cfg(feature = "tracing")]
/// Observer that forwards every event as a `tracing` debug event.
///
/// Only available with the `tracing` feature.
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl Observer for TracingObserver {
    fn trace(&self, consumer: &str, event: TraceEvent) {
        tracing::debug!(consumer, ?event, "consumer trace");
    }
}

#[cfg(any(test, feature = "testing"))]
/// Observer that records every event for assertions.
///
/// Only available with the `testing` feature or during tests.
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<(String, TraceEvent)>>>,
}

#[cfg(any(test, feature = "testing"))]
impl Clone for RecordingObserver {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for RecordingObserver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Observer for RecordingObserver {
    fn trace(&self, consumer: &str, event: TraceEvent) {
        self.events.lock().push((consumer.to_owned(), event));
    }
}

#[cfg(any(test, feature = "testing"))]
impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of events recorded so far.
    pub fn count(&self) -> usize {
        self.events.lock().len()
    }

    /// Snapshot of all recorded `(consumer, event)` pairs.
    pub fn events(&self) -> Vec<(String, TraceEvent)> {
        self.events.lock().clone()
    }

    /// Events recorded for one consumer name, in order.
    pub fn events_for(&self, consumer: &str) -> Vec<TraceEvent> {
        self.events
            .lock()
            .iter()
            .filter(|(name, _)| name == consumer)
            .map(|(_, event)| *event)
            .collect()
    }
}
