//! Subscription nodes: select a slice of shared state, memoize, render.

use std::sync::Arc;

use spin::Mutex;

use crate::boundary::Boundary;
use crate::diagnostics::{NullObserver, Observer, Trace, TraceEvent};
use crate::equality::{Equality, ShallowEq};
use crate::render::{RenderFn, Renderer};
use crate::selector::Selector;
use crate::store::{Store, SubscriberId};

struct Selected<State, Derived> {
    snapshot: Arc<State>,
    selector: Selector<State, Derived>,
    derived: Arc<Derived>,
}

struct ConsumerInner<State, Derived, Output> {
    selector: Selector<State, Derived>,
    render: RenderFn<Derived, Output>,
    boundary: Boundary<Derived, Output>,
    selected: Option<Selected<State, Derived>>,
    name: Option<String>,
    observer: Arc<dyn Observer>,
}

/// A subscription node over a [`Store`].
///
/// A consumer applies its [`Selector`] to the current snapshot and hands the
/// derived slice to a memoized [`Boundary`]. Two caches stack up:
///
/// 1. The *selection* cache: the slice is recomputed only when the selector
///    identity or the snapshot identity changed; otherwise the previous
///    `Arc<Derived>` allocation is reused and the selector is not called.
/// 2. The boundary's single render slot: the render callback runs only when
///    the derived value changed under the [`Equality`] policy or the callback
///    handle was swapped.
///
/// The render callback therefore always sees the slice derived from the
/// newest snapshot the consumer observed — a skip means "nothing relevant
/// changed", never "stale data".
///
/// `Consumer` is a cheap-clone handle; [`mount`](Consumer::mount) clones it
/// into the store's subscriber registry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use sliver::{Consumer, Equality, RenderFn, Renderer, Selector, Store};
///
/// #[derive(Clone)]
/// struct AppState { clicks: u64 }
///
/// struct Console;
///
/// impl Renderer<Arc<String>> for Console {
///     fn render(&mut self, output: Arc<String>) {
///         println!("{output}");
///     }
/// }
///
/// let store = Store::new(AppState { clicks: 0 });
/// let consumer = Consumer::new(
///     Selector::new(|state: &AppState| state.clicks),
///     RenderFn::new(|clicks: &u64| format!("clicks: {clicks}")),
///     Equality::Shallow,
/// );
/// let _mounted = consumer.mount(&store, Console);
///
/// store.publish(AppState { clicks: 1 });
/// ```
pub struct Consumer<State, Derived, Output> {
    inner: Arc<Mutex<ConsumerInner<State, Derived, Output>>>,
}

impl<State, Derived, Output> Clone for Consumer<State, Derived, Output> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<State, Derived, Output> Consumer<State, Derived, Output>
where
    State: Send + Sync + 'static,
    Derived: ShallowEq + Send + Sync + 'static,
    Output: Send + Sync + 'static,
{
    /// A consumer with no diagnostic name and a discarding observer.
    pub fn new(
        selector: Selector<State, Derived>,
        render: RenderFn<Derived, Output>,
        equality: Equality,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ConsumerInner {
                selector,
                render,
                boundary: Boundary::new(equality),
                selected: None,
                name: None,
                observer: Arc::new(NullObserver),
            })),
        }
    }

    /// Attach a diagnostic name. Only named consumers emit trace events.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.inner.lock().name = Some(name.into());
        self
    }

    /// Install an observer for trace events.
    ///
    /// Observers are observability aids only; installing, swapping, or
    /// removing one never changes what gets rendered.
    pub fn with_observer(self, observer: Arc<dyn Observer>) -> Self {
        self.inner.lock().observer = observer;
        self
    }

    /// The diagnostic name, if any.
    pub fn name(&self) -> Option<String> {
        self.inner.lock().name.clone()
    }

    /// Swap the selector.
    ///
    /// A handle with a new identity forces the slice to be recomputed on the
    /// next render, even when the logic is equivalent.
    pub fn set_selector(&self, selector: Selector<State, Derived>) {
        self.inner.lock().selector = selector;
    }

    /// Swap the render callback.
    ///
    /// A handle with a new identity defeats the boundary's skip branch on the
    /// next render, even when the derived value is unchanged.
    pub fn set_render(&self, render: RenderFn<Derived, Output>) {
        self.inner.lock().render = render;
    }

    /// The most recently produced output, if the consumer has rendered.
    pub fn output(&self) -> Option<Arc<Output>> {
        self.inner.lock().boundary.output()
    }

    /// Render against `snapshot` and return the output.
    ///
    /// Idempotent for unchanged inputs: calling this twice with the same
    /// snapshot returns the same output allocation and neither the selector
    /// nor the render callback runs a second time.
    pub fn render(&self, snapshot: &Arc<State>) -> Arc<Output> {
        self.render_step(snapshot).0
    }

    /// Render once against the current snapshot, deliver the output to
    /// `renderer`, and subscribe so every publish re-renders.
    ///
    /// Output is delivered only when the render callback actually ran; a
    /// memoized skip delivers nothing and the previously rendered subtree
    /// stands. The returned guard unsubscribes when dropped.
    pub fn mount<R>(&self, store: &Store<State>, renderer: R) -> Mounted<State>
    where
        R: Renderer<Arc<Output>> + Send + 'static,
    {
        let renderer = Arc::new(Mutex::new(renderer));

        let (output, _) = self.render_step(&store.snapshot());
        renderer.lock().render(output);

        let consumer = self.clone();
        let subscriber_renderer = renderer.clone();
        let id = store.subscribe(move |snapshot| {
            let (output, invoked) = consumer.render_step(snapshot);
            if invoked {
                subscriber_renderer.lock().render(output);
            }
        });

        Mounted {
            store: store.clone(),
            id,
        }
    }

    fn render_step(&self, snapshot: &Arc<State>) -> (Arc<Output>, bool) {
        let mut inner = self.inner.lock();
        let ConsumerInner {
            selector,
            render,
            boundary,
            selected,
            name,
            observer,
        } = &mut *inner;

        let trace = match name.as_deref() {
            Some(name) => Trace::named(name, observer.as_ref()),
            None => Trace::disabled(),
        };

        let derived = match selected {
            Some(current)
                if Arc::ptr_eq(&current.snapshot, snapshot)
                    && current.selector.ptr_eq(selector) =>
            {
                current.derived.clone()
            }
            _ => {
                if let Some(previous) = selected.as_ref() {
                    if !previous.selector.ptr_eq(selector) {
                        trace.emit(TraceEvent::SelectorChanged);
                    }
                    if !Arc::ptr_eq(&previous.snapshot, snapshot) {
                        trace.emit(TraceEvent::SnapshotChanged);
                    }
                }
                let derived = Arc::new(selector.select(snapshot));
                if selected.is_some() {
                    trace.emit(TraceEvent::DerivedChanged);
                }
                *selected = Some(Selected {
                    snapshot: snapshot.clone(),
                    selector: selector.clone(),
                    derived: derived.clone(),
                });
                derived
            }
        };

        boundary.render(derived, render.clone(), &trace)
    }
}

/// Guard for a mounted consumer; unsubscribes from the store on drop.
pub struct Mounted<State> {
    store: Store<State>,
    id: SubscriberId,
}

impl<State> Mounted<State> {
    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn unmount(self) {}
}

impl<State> Drop for Mounted<State> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.id);
    }
}
