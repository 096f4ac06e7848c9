//! Pure state-to-slice transforms with identity.

use std::sync::Arc;

/// A pure transform from a full state snapshot to the slice a consumer cares
/// about.
///
/// Closures of the shape `Fn(&State) -> Derived` implement this trait via the
/// blanket implementation, so most selectors are written inline:
///
/// ```rust
/// use sliver::Selector;
///
/// struct AppState { clicks: u64, label: String }
///
/// let selector = Selector::new(|state: &AppState| state.clicks);
/// ```
pub trait Select<State, Derived> {
    /// Derive the slice from a snapshot.
    fn select(&self, state: &State) -> Derived;
}

impl<F, State, Derived> Select<State, Derived> for F
where
    F: Fn(&State) -> Derived,
{
    fn select(&self, state: &State) -> Derived {
        self(state)
    }
}

/// Cloneable selector handle.
///
/// Identity is allocation identity: two selectors built from the same logic
/// but through separate [`Selector::new`] calls are distinct, and a consumer
/// treats swapping between them as a reason to recompute its slice. Clones of
/// one handle share identity. Construct a selector once and reuse the handle
/// wherever the derived slice should stay memoized.
pub struct Selector<State, Derived>(Arc<dyn Select<State, Derived> + Send + Sync>);

impl<State, Derived> Clone for Selector<State, Derived> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<State, Derived> Selector<State, Derived> {
    /// Wrap a transform into a handle with fresh identity.
    pub fn new(select: impl Select<State, Derived> + Send + Sync + 'static) -> Self {
        Self(Arc::new(select))
    }

    /// Apply the transform to a snapshot.
    pub fn select(&self, state: &State) -> Derived {
        self.0.select(state)
    }

    /// Whether both handles share the same underlying transform.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
