//! Render callbacks and the renderer sink abstraction.

use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// A render callback with identity: derived slice in, rendered output out.
///
/// Like [`Selector`](crate::Selector), identity is allocation identity, and it
/// is half of the memoization contract: a [`Boundary`](crate::Boundary) only
/// skips re-rendering when both the derived value *and* the render callback
/// are unchanged. Construct the callback once and reuse the handle; rebuilding
/// it on every composition cycle defeats the skip branch even when the derived
/// value never changes.
pub struct RenderFn<Derived, Output>(Arc<dyn Fn(&Derived) -> Output + Send + Sync>);

impl<Derived, Output> Clone for RenderFn<Derived, Output> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Derived, Output> RenderFn<Derived, Output> {
    /// Wrap a render callback into a handle with fresh identity.
    pub fn new(render: impl Fn(&Derived) -> Output + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    /// Invoke the callback.
    pub fn render(&self, derived: &Derived) -> Output {
        (self.0)(derived)
    }

    /// Whether both handles share the same underlying callback.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Sink for rendered output.
///
/// Implement this trait to hand consumer output to your actual presentation
/// layer (a widget tree, a terminal, a plain `println!`). A mounted consumer
/// delivers output here only when its render callback really ran; a memoized
/// skip delivers nothing and the previously rendered subtree stands.
///
/// # Example
///
/// ```rust
/// use sliver::Renderer;
///
/// struct Console;
///
/// impl Renderer<String> for Console {
///     fn render(&mut self, output: String) {
///         println!("{output}");
///     }
/// }
/// ```
pub trait Renderer<Output> {
    /// Render the given output.
    fn render(&mut self, output: Output);
}

#[cfg(any(test, feature = "testing"))]
/// Test renderer that captures all delivered outputs for assertions.
///
/// Only available with the `testing` feature or during tests.
///
/// Because a mounted consumer only delivers output when its render callback
/// actually ran, [`count`](TestRenderer::count) doubles as the number of real
/// re-renders: asserting that it stayed flat across an update cycle is how the
/// render-skip laws are tested.
pub struct TestRenderer<Output> {
    renders: Arc<Mutex<Vec<Output>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Output> Clone for TestRenderer<Output> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Output> Renderer<Output> for TestRenderer<Output> {
    fn render(&mut self, output: Output) {
        self.renders.lock().push(output);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Output> Default for TestRenderer<Output> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Output> TestRenderer<Output> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of outputs delivered so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured outputs with a closure.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Output>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Output: Clone> TestRenderer<Output> {
    /// The most recently delivered output, if any.
    pub fn last(&self) -> Option<Output> {
        self.renders.lock().last().cloned()
    }
}
