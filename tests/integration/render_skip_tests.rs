use std::collections::BTreeMap;
use std::sync::Arc;

use sliver::counters::{CounterEvent, CounterState, HoneySlice};
use sliver::{Action, Boundary, Consumer, Equality, RenderFn, Trace};

use super::{calls, counter_driver, counting_render, counting_selector};

#[test]
fn given_reference_policy_when_derived_allocation_unchanged_should_skip() {
    let mut boundary = Boundary::new(Equality::Reference);
    let (render, render_calls) = counting_render(|value: &u64| value * 2);
    let derived = Arc::new(7u64);

    let (first, first_ran) = boundary.render(derived.clone(), render.clone(), &Trace::disabled());
    let (second, second_ran) = boundary.render(derived, render, &Trace::disabled());

    assert!(first_ran);
    assert!(!second_ran);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls(&render_calls), 1);
}

#[test]
fn given_reference_policy_when_equal_value_in_new_allocation_should_rerender() {
    let mut boundary = Boundary::new(Equality::Reference);
    let (render, render_calls) = counting_render(|value: &u64| value * 2);

    boundary.render(Arc::new(7u64), render.clone(), &Trace::disabled());
    let (_, ran) = boundary.render(Arc::new(7u64), render, &Trace::disabled());

    assert!(ran);
    assert_eq!(calls(&render_calls), 2);
}

#[test]
fn given_shallow_policy_when_fields_unchanged_should_skip_new_allocation() {
    let add_honey = Action::new(|| {});
    let mut boundary = Boundary::new(Equality::Shallow);
    let (render, render_calls) = counting_render(|slice: &HoneySlice| {
        format!("honey: {}", slice.honey)
    });

    let first = Arc::new(HoneySlice {
        honey: 0,
        add_honey: add_honey.clone(),
    });
    let second = Arc::new(HoneySlice {
        honey: 0,
        add_honey: add_honey.clone(),
    });
    assert!(!Arc::ptr_eq(&first, &second));

    let (cached, _) = boundary.render(first, render.clone(), &Trace::disabled());
    let (reused, ran) = boundary.render(second, render, &Trace::disabled());

    assert!(!ran);
    assert!(Arc::ptr_eq(&cached, &reused));
    assert_eq!(calls(&render_calls), 1);
}

#[test]
fn given_shallow_policy_when_counter_field_changed_should_rerender() {
    let add_honey = Action::new(|| {});
    let mut boundary = Boundary::new(Equality::Shallow);
    let (render, render_calls) = counting_render(|slice: &HoneySlice| {
        format!("honey: {}", slice.honey)
    });

    boundary.render(
        Arc::new(HoneySlice {
            honey: 0,
            add_honey: add_honey.clone(),
        }),
        render.clone(),
        &Trace::disabled(),
    );
    let (output, ran) = boundary.render(
        Arc::new(HoneySlice {
            honey: 1,
            add_honey,
        }),
        render,
        &Trace::disabled(),
    );

    assert!(ran);
    assert_eq!(*output, "honey: 1");
    assert_eq!(calls(&render_calls), 2);
}

#[test]
fn given_shallow_policy_when_action_identity_changed_should_rerender() {
    let mut boundary = Boundary::new(Equality::Shallow);
    let (render, render_calls) = counting_render(|slice: &HoneySlice| {
        format!("honey: {}", slice.honey)
    });

    boundary.render(
        Arc::new(HoneySlice {
            honey: 0,
            add_honey: Action::new(|| {}),
        }),
        render.clone(),
        &Trace::disabled(),
    );
    let (_, ran) = boundary.render(
        Arc::new(HoneySlice {
            honey: 0,
            add_honey: Action::new(|| {}),
        }),
        render,
        &Trace::disabled(),
    );

    assert!(ran);
    assert_eq!(calls(&render_calls), 2);
}

#[test]
fn given_new_render_callback_when_derived_unchanged_should_rerender() {
    let mut boundary = Boundary::new(Equality::Shallow);
    let (first_render, first_calls) = counting_render(|value: &u64| value * 2);
    let (second_render, second_calls) = counting_render(|value: &u64| value * 2);
    let derived = Arc::new(7u64);

    boundary.render(derived.clone(), first_render, &Trace::disabled());
    let (_, ran) = boundary.render(derived, second_render, &Trace::disabled());

    assert!(ran);
    assert_eq!(calls(&first_calls), 1);
    assert_eq!(calls(&second_calls), 1);
}

#[test]
fn given_unchanged_snapshot_when_rendered_twice_should_not_reselect() {
    let driver = counter_driver();
    let store = driver.store();
    let (selector, selector_calls) = counting_selector(|state: &CounterState| state.beer);
    let (render, render_calls) = counting_render(|beer: &u64| format!("beers: {beer}"));
    let consumer = Consumer::new(selector, render, Equality::Reference);

    let snapshot = store.snapshot();
    let first = consumer.render(&snapshot);
    let second = consumer.render(&snapshot);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls(&selector_calls), 1);
    assert_eq!(calls(&render_calls), 1);
}

#[test]
fn given_two_consumers_with_distinct_selectors_should_memoize_independently() {
    let mut driver = counter_driver();
    let store = driver.store();

    let (first_selector, first_calls) = counting_selector(|state: &CounterState| state.beer);
    let (second_selector, second_calls) = counting_selector(|state: &CounterState| state.beer);
    let first = Consumer::new(
        first_selector,
        RenderFn::new(|beer: &u64| format!("beers: {beer}")),
        Equality::Shallow,
    );
    let second = Consumer::new(
        second_selector,
        RenderFn::new(|beer: &u64| format!("beers: {beer}")),
        Equality::Shallow,
    );

    let before = store.snapshot();
    first.render(&before);
    second.render(&before);

    driver.emitter().emit(CounterEvent::AddBeer);
    driver.process_events();

    let after = store.snapshot();
    let first_output = first.render(&after);
    let second_output = second.render(&after);

    // One consumer's cache never satisfies the other's recomputation.
    assert_eq!(calls(&first_calls), 2);
    assert_eq!(calls(&second_calls), 2);
    assert_eq!(*first_output, "beers: 1");
    assert_eq!(*second_output, "beers: 1");
}

type MapSlice = BTreeMap<&'static str, Arc<u64>>;

#[test]
fn given_shallow_map_when_cached_key_dropped_should_force_rerender() {
    let mut boundary = Boundary::new(Equality::Shallow);
    let (render, render_calls) = counting_render(|slice: &MapSlice| slice.len());
    let shared = Arc::new(1u64);

    let cached: MapSlice = [("a", shared.clone()), ("b", Arc::new(2u64))].into();
    let next: MapSlice = [("a", shared)].into();

    boundary.render(Arc::new(cached), render.clone(), &Trace::disabled());
    let (_, ran) = boundary.render(Arc::new(next), render, &Trace::disabled());

    assert!(ran);
    assert_eq!(calls(&render_calls), 2);
}

#[test]
fn given_shallow_map_when_key_only_added_should_still_skip() {
    let mut boundary = Boundary::new(Equality::Shallow);
    let (render, render_calls) = counting_render(|slice: &MapSlice| slice.len());
    let shared = Arc::new(1u64);

    let cached: MapSlice = [("a", shared.clone())].into();
    let next: MapSlice = [("a", shared), ("b", Arc::new(2u64))].into();

    boundary.render(Arc::new(cached), render.clone(), &Trace::disabled());
    // The comparison only walks the cached entries, so the added key is
    // invisible; asserted here as the quirk it is.
    let (_, ran) = boundary.render(Arc::new(next), render, &Trace::disabled());

    assert!(!ran);
    assert_eq!(calls(&render_calls), 1);
}
