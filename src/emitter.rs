//! Event emitter and action handles for embedding in state snapshots.

use std::fmt;
use std::sync::Arc;

use flume::Sender;

/// Event emitter that can be embedded in snapshots and rendered output.
///
/// Clone this handle to create callbacks that enqueue events when invoked
/// (e.g., by user interaction). `Emitter` wraps a lock-free channel sender,
/// making it cheap to clone and thread-safe without any locking overhead.
///
/// Events sent through an emitter are *queued*, never applied in place: the
/// owning [`StoreRuntime`](crate::StoreRuntime) drains the queue and replaces
/// the snapshot one event at a time, so a callback can never observe a
/// half-formed state.
pub struct Emitter<Event: Send>(pub(crate) Sender<Event>);

impl<Event: Send> Clone for Emitter<Event> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Event: Send> Emitter<Event> {
    /// Create a new emitter from a channel sender.
    pub(crate) fn new(sender: Sender<Event>) -> Self {
        Self(sender)
    }

    /// Emit an event.
    ///
    /// This queues the event for processing by the runtime. Multiple threads
    /// can safely call this method concurrently.
    pub fn emit(&self, event: Event) {
        self.0.send(event).ok();
    }
}

/// A zero-argument callback with identity.
///
/// Actions are carried inside state snapshots (e.g., an `add_beer` field) and
/// inside rendered output (e.g., a click handler). Two actions compare equal
/// under [`ptr_eq`](Action::ptr_eq) only when they are clones of the same
/// allocation; shallow equality policies rely on this to decide that an
/// unchanged handler does not force a re-render.
///
/// # Example
///
/// ```rust
/// use sliver::Action;
///
/// let action = Action::new(|| println!("clicked"));
/// let same = action.clone();
/// assert!(action.ptr_eq(&same));
///
/// let lookalike = Action::new(|| println!("clicked"));
/// assert!(!action.ptr_eq(&lookalike));
/// ```
pub struct Action(Arc<dyn Fn() + Send + Sync>);

impl Clone for Action {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&Arc::as_ptr(&self.0)).finish()
    }
}

impl Action {
    /// Wrap an arbitrary callback.
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// An action that emits `event` on the given emitter each time it is
    /// invoked.
    ///
    /// This is the usual way increment actions end up inside a snapshot: the
    /// initial state builds them once from the runtime's emitter, and every
    /// reduced snapshot carries the same handles over unchanged.
    pub fn emits<Event>(emitter: &Emitter<Event>, event: Event) -> Self
    where
        Event: Clone + Send + Sync + 'static,
    {
        let emitter = emitter.clone();
        Self::new(move || emitter.emit(event.clone()))
    }

    /// Invoke the callback.
    pub fn invoke(&self) {
        (self.0)()
    }

    /// Whether both handles point at the same underlying callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
