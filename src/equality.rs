//! Equality policies deciding whether a memoized subtree may be skipped.

use std::collections::BTreeMap;
use std::sync::Arc;

/// How a [`Boundary`](crate::Boundary) compares the cached derived value with
/// the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equality {
    /// Skip only when the derived allocation itself is unchanged.
    ///
    /// Because a consumer recomputes its slice into a fresh allocation on
    /// every snapshot change, this policy effectively re-renders on every
    /// store update. It is the earlier, weaker iteration of the pattern and
    /// is kept for comparison; prefer [`Equality::Shallow`].
    Reference,
    /// Skip when the cached value matches the next one field by field, one
    /// level deep (see [`ShallowEq`]).
    ///
    /// This is the intended policy: a composite slice rebuilt from an
    /// unchanged portion of the state compares equal even though it is a new
    /// allocation, so the subtree is not re-rendered.
    Shallow,
}

impl Equality {
    /// Whether `next` counts as unchanged relative to `cached` under this
    /// policy.
    ///
    /// The shallow policy checks allocation identity first, so a reused
    /// derived value always counts as unchanged regardless of how its type
    /// implements [`ShallowEq`].
    pub(crate) fn unchanged<Derived: ShallowEq>(self, cached: &Arc<Derived>, next: &Arc<Derived>) -> bool {
        match self {
            Equality::Reference => Arc::ptr_eq(cached, next),
            Equality::Shallow => Arc::ptr_eq(cached, next) || cached.shallow_eq(next),
        }
    }
}

/// One-level structural comparison of derived values.
///
/// Composite slices implement this by comparing each field the way the field
/// wants to be compared: counters by value, [`Action`](crate::Action) handles
/// and other shared allocations by identity. Primitives compare by value,
/// which is what identity comparison degenerates to for them anyway.
///
/// `self` is always the *cached* value and `next` the incoming one; the two
/// roles are not interchangeable for every implementation (see the map
/// implementation below).
pub trait ShallowEq {
    /// Compare the cached value against the next one, one level deep.
    fn shallow_eq(&self, next: &Self) -> bool;
}

macro_rules! value_shallow_eq {
    ($($ty:ty),* $(,)?) => {$(
        impl ShallowEq for $ty {
            fn shallow_eq(&self, next: &Self) -> bool {
                self == next
            }
        }
    )*};
}

value_shallow_eq!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    bool, char, (),
    String, &'static str,
);

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, next: &Self) -> bool {
        match (self, next) {
            (Some(cached), Some(next)) => cached.shallow_eq(next),
            (None, None) => true,
            _ => false,
        }
    }
}

/// Map-shaped derived values compare the *cached* entries only: a key missing
/// from `next` forces a re-render, while a key present only in `next` is
/// invisible to the comparison and does not prevent a skip. The walk is
/// one-sided, so the asymmetry is a quirk, not a contract.
impl<K: Ord, V> ShallowEq for BTreeMap<K, Arc<V>> {
    fn shallow_eq(&self, next: &Self) -> bool {
        self.iter().all(|(key, cached)| {
            next.get(key).is_some_and(|value| Arc::ptr_eq(cached, value))
        })
    }
}
