//! Selector-based subscriptions over shared state with memoized render
//! boundaries.
//!
//! A [`Store`] holds an immutable state snapshot and notifies subscribers
//! whenever the snapshot is replaced. A [`Consumer`] subscribes to a *slice*
//! of that state through a [`Selector`] and re-invokes its render callback
//! only when the slice actually changed under an [`Equality`] policy — so a
//! subtree that only cares about one counter stays untouched while an
//! unrelated counter increments.
//!
//! State transitions are event-driven: callbacks embedded in snapshots
//! ([`Action`]) enqueue events through an [`Emitter`], and a [`StoreRuntime`]
//! reduces them one at a time via a [`Reducer`], publishing each resulting
//! snapshot synchronously to every subscriber. Snapshots are replaced
//! wholesale, never mutated, which is the entire concurrency story.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use sliver::{Consumer, Equality, RenderFn, Renderer, Selector, Store};
//!
//! #[derive(Clone)]
//! struct AppState {
//!     clicks: u64,
//!     title: String,
//! }
//!
//! struct Console;
//!
//! impl Renderer<Arc<String>> for Console {
//!     fn render(&mut self, output: Arc<String>) {
//!         println!("{output}");
//!     }
//! }
//!
//! let store = Store::new(AppState {
//!     clicks: 0,
//!     title: "demo".to_owned(),
//! });
//!
//! // Built once; the handles' identity is what keeps memoization intact.
//! let consumer = Consumer::new(
//!     Selector::new(|state: &AppState| state.clicks),
//!     RenderFn::new(|clicks: &u64| format!("clicks: {clicks}")),
//!     Equality::Shallow,
//! );
//! let _mounted = consumer.mount(&store, Console);
//!
//! // Re-renders: the selected slice changed.
//! store.publish(AppState {
//!     clicks: 1,
//!     title: "demo".to_owned(),
//! });
//!
//! // Skipped: a new snapshot, but the slice is unchanged.
//! store.publish(AppState {
//!     clicks: 1,
//!     title: "renamed".to_owned(),
//! });
//! ```
//!
//! The [`counters`] module carries the classic two-counter demo this crate
//! grew out of, wired end to end through a [`StoreRuntime`].
//!
//! ## Diagnostics
//!
//! A consumer given a name via [`Consumer::with_name`] reports
//! [`TraceEvent`]s to an [`Observer`] — which inputs changed, whether the
//! render callback ran. Tracing is purely observational and never alters a
//! render decision. With the `tracing` feature, `TracingObserver` forwards
//! events to the `tracing` ecosystem.

// Module declarations
mod boundary;
mod consumer;
pub mod counters;
mod diagnostics;
mod emitter;
mod equality;
mod reducer;
mod render;
mod runtime;
mod selector;
mod store;

// Public re-exports
pub use boundary::Boundary;
pub use consumer::{Consumer, Mounted};
pub use diagnostics::{NullObserver, Observer, Trace, TraceEvent};
pub use emitter::{Action, Emitter};
pub use equality::{Equality, ShallowEq};
pub use reducer::Reducer;
pub use render::{RenderFn, Renderer};
pub use runtime::StoreRuntime;
pub use selector::{Select, Selector};
pub use store::{Store, SubscriberId};

#[cfg(feature = "tracing")]
pub use diagnostics::TracingObserver;

// Test utilities (only available with the 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use diagnostics::RecordingObserver;
#[cfg(any(test, feature = "testing"))]
pub use render::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::TestStoreDriver;
