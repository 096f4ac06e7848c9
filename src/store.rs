//! Observable shared-state store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use spin::Mutex;

type SubscriberFn<State> = Box<dyn Fn(&Arc<State>) + Send>;

/// Identifier handed out by [`Store::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriberId(u64);

struct StoreInner<State> {
    snapshot: Mutex<Arc<State>>,
    subscribers: Mutex<Vec<(SubscriberId, SubscriberFn<State>)>>,
    next_id: AtomicU64,
}

/// Shared-state value holder plus a registry of subscriber callbacks.
///
/// The snapshot is never mutated in place: [`publish`](Store::publish)
/// replaces it wholesale and then invokes every subscriber synchronously with
/// the new `Arc`, in registration order. Snapshot identity (`Arc::ptr_eq`) is
/// therefore a reliable "did anything change" signal for consumers.
///
/// The registry lock is held across notification: subscriber callbacks must
/// not subscribe, unsubscribe, or publish. Mounted consumers satisfy this
/// naturally because their click handlers only enqueue events on an
/// [`Emitter`](crate::Emitter); the next publish happens in a later runtime
/// step.
///
/// `Store` is a cheap-clone handle; all clones observe the same snapshot and
/// registry.
pub struct Store<State> {
    inner: Arc<StoreInner<State>>,
}

impl<State> Clone for Store<State> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<State> Store<State> {
    /// A store holding `initial` with no subscribers.
    pub fn new(initial: State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                snapshot: Mutex::new(Arc::new(initial)),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<State> {
        self.inner.snapshot.lock().clone()
    }

    /// Replace the snapshot and notify every subscriber synchronously.
    pub fn publish(&self, next: State) {
        let snapshot = Arc::new(next);
        *self.inner.snapshot.lock() = snapshot.clone();

        let subscribers = self.inner.subscribers.lock();
        for (_, notify) in subscribers.iter() {
            notify(&snapshot);
        }
    }

    /// Register a callback invoked on every publish.
    ///
    /// The callback is *not* invoked with the current snapshot at
    /// registration time; callers that need an initial delivery read
    /// [`snapshot`](Store::snapshot) themselves, the way
    /// [`Consumer::mount`](crate::Consumer::mount) does.
    pub fn subscribe(&self, notify: impl Fn(&Arc<State>) + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.subscribers.lock().push((id, Box::new(notify)));
        id
    }

    /// Remove a previously registered callback. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.inner
            .subscribers
            .lock()
            .retain(|(existing, _)| *existing != id);
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}
