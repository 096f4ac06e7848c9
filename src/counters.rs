//! The beer & honey counter demo, wired through consumers.
//!
//! Two feature components share one [`CounterState`]: a beer counter and a
//! honey counter, each mounted as its own [`Consumer`]. Incrementing one
//! counter publishes a new snapshot to both; whether the *other* counter's
//! subtree re-renders is exactly what the [`Equality`] policies differ on,
//! and why this demo exists.
//!
//! ```rust
//! use std::sync::Arc;
//! use sliver::counters::{self, CounterReducer, CounterState, Element};
//! use sliver::{Equality, Renderer, StoreRuntime};
//!
//! struct Console;
//!
//! impl Renderer<Arc<Element>> for Console {
//!     fn render(&mut self, element: Arc<Element>) {
//!         println!("{}", element.label);
//!     }
//! }
//!
//! let runtime = StoreRuntime::new(CounterReducer, CounterState::initial);
//! let store = runtime.store();
//!
//! let beer = counters::beer_counter_slice();
//! let honey = counters::honey_counter(Equality::Shallow);
//! let _beer_mount = beer.mount(&store, Console);
//! let _honey_mount = honey.mount(&store, Console);
//! // runtime.run() would now drain clicks forever.
//! ```

use crate::consumer::Consumer;
use crate::emitter::{Action, Emitter};
use crate::equality::{Equality, ShallowEq};
use crate::reducer::Reducer;
use crate::render::RenderFn;
use crate::selector::Selector;

/// Counter increment events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CounterEvent {
    AddBeer,
    AddHoney,
}

/// The shared snapshot: both counters plus their increment actions.
///
/// Snapshots are immutable; every increment produces a new one with exactly
/// one counter bumped and everything else carried over, so the action handles
/// keep their identity across the whole application lifetime.
#[derive(Clone, Debug)]
pub struct CounterState {
    pub beer: u64,
    pub honey: u64,
    pub add_beer: Action,
    pub add_honey: Action,
}

impl CounterState {
    /// The initial snapshot, with both counters at zero and actions wired to
    /// `emitter`. Pass this to [`StoreRuntime::new`](crate::StoreRuntime::new).
    pub fn initial(emitter: &Emitter<CounterEvent>) -> Self {
        CounterState {
            beer: 0,
            honey: 0,
            add_beer: Action::emits(emitter, CounterEvent::AddBeer),
            add_honey: Action::emits(emitter, CounterEvent::AddHoney),
        }
    }
}

/// Reducer for [`CounterEvent`]: increments always succeed.
pub struct CounterReducer;

impl Reducer<CounterEvent, CounterState> for CounterReducer {
    fn reduce(&self, event: CounterEvent, state: &CounterState) -> CounterState {
        match event {
            CounterEvent::AddBeer => CounterState {
                beer: state.beer + 1,
                ..state.clone()
            },
            CounterEvent::AddHoney => CounterState {
                honey: state.honey + 1,
                ..state.clone()
            },
        }
    }
}

/// Rendered output of a feature component: a labelled, optionally clickable
/// display element.
#[derive(Clone, Debug)]
pub struct Element {
    pub label: String,
    pub on_click: Option<Action>,
}

impl Element {
    /// Invoke the click handler, if the element has one.
    pub fn click(&self) {
        if let Some(action) = &self.on_click {
            action.invoke();
        }
    }
}

/// Composite beer slice: the counter plus its increment action.
#[derive(Clone, Debug)]
pub struct BeerSlice {
    pub beer: u64,
    pub add_beer: Action,
}

impl ShallowEq for BeerSlice {
    fn shallow_eq(&self, next: &Self) -> bool {
        self.beer == next.beer && self.add_beer.ptr_eq(&next.add_beer)
    }
}

/// Composite honey slice: the counter plus its increment action.
#[derive(Clone, Debug)]
pub struct HoneySlice {
    pub honey: u64,
    pub add_honey: Action,
}

impl ShallowEq for HoneySlice {
    fn shallow_eq(&self, next: &Self) -> bool {
        self.honey == next.honey && self.add_honey.ptr_eq(&next.add_honey)
    }
}

/// Read-only beer counter over the primitive slice, memoized by reference
/// only.
///
/// The weaker of the two beer renditions: every publish recomputes the slice
/// into a fresh allocation, so [`Equality::Reference`] never skips and the
/// label re-renders even when only honey changed. Kept as the baseline the
/// shallow variant improves on.
pub fn beer_counter() -> Consumer<CounterState, u64, Element> {
    let selector = Selector::new(|state: &CounterState| state.beer);
    let render = RenderFn::new(|beer: &u64| Element {
        label: format!("beers: {beer}"),
        on_click: None,
    });
    Consumer::new(selector, render, Equality::Reference)
}

/// Clickable beer counter over the composite slice, memoized shallowly.
///
/// A honey increment rebuilds the slice, but both fields compare unchanged
/// (counter by value, action by identity), so the beer subtree is skipped.
pub fn beer_counter_slice() -> Consumer<CounterState, BeerSlice, Element> {
    let selector = Selector::new(|state: &CounterState| BeerSlice {
        beer: state.beer,
        add_beer: state.add_beer.clone(),
    });
    let render = RenderFn::new(|slice: &BeerSlice| Element {
        label: format!("beer: {}", slice.beer),
        on_click: Some(slice.add_beer.clone()),
    });
    Consumer::new(selector, render, Equality::Shallow)
}

/// Clickable honey counter over the composite slice.
///
/// The honey slice is composite in every rendition of this demo; only the
/// equality policy varies, so it is a parameter here.
pub fn honey_counter(equality: Equality) -> Consumer<CounterState, HoneySlice, Element> {
    let selector = Selector::new(|state: &CounterState| HoneySlice {
        honey: state.honey,
        add_honey: state.add_honey.clone(),
    });
    let render = RenderFn::new(|slice: &HoneySlice| Element {
        label: format!("honey: {}", slice.honey),
        on_click: Some(slice.add_honey.clone()),
    });
    Consumer::new(selector, render, equality)
}
