//! The runtime that drains the event queue and publishes snapshots.

use flume::Receiver;

use crate::{Emitter, Reducer, Store};

/// Event-processing runtime around a [`Store`].
///
/// The runtime owns the single event queue: actions embedded in snapshots and
/// rendered output enqueue events through [`Emitter`] handles, and the runtime
/// reduces them one at a time, publishing the resulting snapshot after each
/// step. This serializes all state transitions — every subscriber sees each
/// fully-formed snapshot exactly once, in event order, and a subscriber
/// callback can never re-enter a publish.
///
/// For testing with manual control over when queued events are processed, use
/// [`TestStoreDriver`].
///
/// # Type Parameters
///
/// * `Event` - The event type for your application
/// * `State` - The shared state snapshot type
/// * `R` - The reducer implementation (implements [`Reducer`])
pub struct StoreRuntime<Event, State, R>
where
    Event: Send,
    R: Reducer<Event, State>,
{
    reducer: R,
    store: Store<State>,
    event_receiver: Receiver<Event>,
    emitter: Emitter<Event>,
}

impl<Event, State, R> StoreRuntime<Event, State, R>
where
    Event: Send + 'static,
    R: Reducer<Event, State>,
{
    /// Create a runtime.
    ///
    /// `init` builds the initial snapshot and receives the runtime's emitter,
    /// so the snapshot can carry [`Action`](crate::Action) handles that feed
    /// events back into this runtime.
    pub fn new(reducer: R, init: impl FnOnce(&Emitter<Event>) -> State) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();
        let emitter = Emitter::new(event_sender);
        let store = Store::new(init(&emitter));

        StoreRuntime {
            reducer,
            store,
            event_receiver,
            emitter,
        }
    }

    /// A handle to the store, for reading snapshots and mounting consumers.
    pub fn store(&self) -> Store<State> {
        self.store.clone()
    }

    /// A fresh emitter handle into this runtime's queue.
    pub fn emitter(&self) -> Emitter<Event> {
        self.emitter.clone()
    }

    /// Process events from the queue in a blocking loop.
    ///
    /// Each event is reduced against the current snapshot and the result is
    /// published before the next event is taken. Returns once every emitter
    /// handle (including those inside snapshots) has been dropped.
    pub fn run(&mut self) {
        loop {
            match self.event_receiver.recv() {
                Ok(event) => self.step(event),
                Err(_) => break, // channel closed
            }
        }
    }

    fn step(&mut self, event: Event) {
        let next = self.reducer.reduce(event, &self.store.snapshot());
        self.store.publish(next);
    }
}

#[cfg(any(test, feature = "testing"))]
/// Runtime driver with manual event processing, for tests.
///
/// Only available with the `testing` feature or during tests.
///
/// Unlike [`StoreRuntime::run`], nothing is processed until
/// [`process_events`](TestStoreDriver::process_events) is called, which gives
/// tests precise control over update-cycle timing: emit or click as much as
/// you like, then drain the queue and assert on what rendered.
pub struct TestStoreDriver<Event, State, R>
where
    Event: Send,
    R: Reducer<Event, State>,
{
    runtime: StoreRuntime<Event, State, R>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, State, R> TestStoreDriver<Event, State, R>
where
    Event: Send + 'static,
    R: Reducer<Event, State>,
{
    /// Create a driver; see [`StoreRuntime::new`] for the arguments.
    pub fn new(reducer: R, init: impl FnOnce(&Emitter<Event>) -> State) -> Self {
        Self {
            runtime: StoreRuntime::new(reducer, init),
        }
    }

    /// A handle to the store, for reading snapshots and mounting consumers.
    pub fn store(&self) -> Store<State> {
        self.runtime.store()
    }

    /// A fresh emitter handle into the queue.
    pub fn emitter(&self) -> Emitter<Event> {
        self.runtime.emitter()
    }

    /// Process all queued events, publishing after each one.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.runtime.event_receiver.try_recv() {
            self.runtime.step(event);
        }
    }
}
