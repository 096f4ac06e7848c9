//! Single-slot memoization of a render callback.

use std::sync::Arc;

use crate::diagnostics::{Trace, TraceEvent};
use crate::equality::{Equality, ShallowEq};
use crate::render::RenderFn;

struct Slot<Derived, Output> {
    derived: Arc<Derived>,
    render: RenderFn<Derived, Output>,
    output: Arc<Output>,
}

/// Memoized render boundary.
///
/// Caches the last `(derived, render callback, output)` triple — capacity is
/// always exactly one, so there is no eviction policy — and re-invokes the
/// callback only when the derived value changed under the configured
/// [`Equality`] policy or the callback handle itself has a new identity. On a
/// skip, the cached output allocation is returned as-is.
///
/// This is a pure decision function plus a side table; it never fails.
pub struct Boundary<Derived, Output> {
    equality: Equality,
    slot: Option<Slot<Derived, Output>>,
}

impl<Derived: ShallowEq, Output> Boundary<Derived, Output> {
    /// An empty boundary with the given policy. The first render always
    /// invokes the callback.
    pub fn new(equality: Equality) -> Self {
        Self {
            equality,
            slot: None,
        }
    }

    /// The policy this boundary compares with.
    pub fn equality(&self) -> Equality {
        self.equality
    }

    /// The cached output, if a render has happened.
    pub fn output(&self) -> Option<Arc<Output>> {
        self.slot.as_ref().map(|slot| slot.output.clone())
    }

    /// Produce the output for `derived`.
    ///
    /// Returns the output plus whether the callback was invoked (`false`
    /// means the memoized skip applied and the cached allocation was reused).
    pub fn render(
        &mut self,
        derived: Arc<Derived>,
        render: RenderFn<Derived, Output>,
        trace: &Trace<'_>,
    ) -> (Arc<Output>, bool) {
        if let Some(slot) = &self.slot {
            let same_render = slot.render.ptr_eq(&render);
            if !same_render {
                trace.emit(TraceEvent::RenderFnChanged);
            }
            if same_render && self.equality.unchanged(&slot.derived, &derived) {
                return (slot.output.clone(), false);
            }
        }

        trace.emit(TraceEvent::ChildRendered);
        let output = Arc::new(render.render(&derived));
        self.slot = Some(Slot {
            derived,
            render,
            output: output.clone(),
        });
        (output, true)
    }
}
