use std::sync::Arc;

use sliver::counters::{self, CounterState};
use sliver::{Consumer, Equality, RecordingObserver, RenderFn, Selector, TestRenderer, TraceEvent};

use super::{counter_driver, counting_selector, MockTraceSink};

#[test]
fn given_named_consumer_when_mounted_should_trace_child_render_only() {
    let driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let _mount = counters::honey_counter(Equality::Shallow)
        .with_name("honey")
        .with_observer(Arc::new(observer.clone()))
        .mount(&store, TestRenderer::new());

    assert_eq!(observer.events_for("honey"), vec![TraceEvent::ChildRendered]);
}

#[test]
fn given_unrelated_increment_should_trace_recompute_without_child_render() {
    let mut driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let _mount = counters::honey_counter(Equality::Shallow)
        .with_name("honey")
        .with_observer(Arc::new(observer.clone()))
        .mount(&store, TestRenderer::new());

    store.snapshot().add_beer.invoke();
    driver.process_events();

    assert_eq!(
        observer.events_for("honey"),
        vec![
            TraceEvent::ChildRendered,
            TraceEvent::SnapshotChanged,
            TraceEvent::DerivedChanged,
        ]
    );
}

#[test]
fn given_own_increment_should_trace_recompute_and_child_render() {
    let mut driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let _mount = counters::honey_counter(Equality::Shallow)
        .with_name("honey")
        .with_observer(Arc::new(observer.clone()))
        .mount(&store, TestRenderer::new());

    store.snapshot().add_honey.invoke();
    driver.process_events();

    assert_eq!(
        observer.events_for("honey"),
        vec![
            TraceEvent::ChildRendered,
            TraceEvent::SnapshotChanged,
            TraceEvent::DerivedChanged,
            TraceEvent::ChildRendered,
        ]
    );
}

#[test]
fn given_unnamed_consumer_should_trace_nothing() {
    let mut driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let _mount = counters::honey_counter(Equality::Shallow)
        .with_observer(Arc::new(observer.clone()))
        .mount(&store, TestRenderer::new());

    store.snapshot().add_honey.invoke();
    driver.process_events();

    assert_eq!(observer.count(), 0);
}

#[test]
fn given_selector_swap_should_trace_selector_and_derived_change() {
    let driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let consumer = Consumer::new(
        Selector::new(|state: &CounterState| state.beer),
        RenderFn::new(|beer: &u64| format!("beers: {beer}")),
        Equality::Shallow,
    )
    .with_name("beer")
    .with_observer(Arc::new(observer.clone()));

    let snapshot = store.snapshot();
    consumer.render(&snapshot);

    let (replacement, _) = counting_selector(|state: &CounterState| state.beer);
    consumer.set_selector(replacement);
    consumer.render(&snapshot);

    let events = observer.events_for("beer");
    assert!(events.contains(&TraceEvent::SelectorChanged));
    assert!(events.contains(&TraceEvent::DerivedChanged));
    assert!(!events.contains(&TraceEvent::SnapshotChanged));
}

#[test]
fn given_render_swap_should_trace_render_fn_change() {
    let driver = counter_driver();
    let store = driver.store();

    let observer = RecordingObserver::new();
    let consumer = Consumer::new(
        Selector::new(|state: &CounterState| state.beer),
        RenderFn::new(|beer: &u64| format!("beers: {beer}")),
        Equality::Shallow,
    )
    .with_name("beer")
    .with_observer(Arc::new(observer.clone()));

    let snapshot = store.snapshot();
    consumer.render(&snapshot);

    consumer.set_render(RenderFn::new(|beer: &u64| format!("beers: {beer}")));
    consumer.render(&snapshot);

    assert_eq!(
        observer.events_for("beer"),
        vec![
            TraceEvent::ChildRendered,
            TraceEvent::RenderFnChanged,
            TraceEvent::ChildRendered,
        ]
    );
}

#[test]
fn given_mocked_observer_when_mounted_should_receive_exactly_one_trace() {
    let driver = counter_driver();
    let store = driver.store();

    let mut sink = MockTraceSink::new();
    sink.expect_trace()
        .withf(|consumer, event| consumer == "honey" && *event == TraceEvent::ChildRendered)
        .times(1)
        .return_const(());

    let _mount = counters::honey_counter(Equality::Shallow)
        .with_name("honey")
        .with_observer(Arc::new(sink))
        .mount(&store, TestRenderer::new());
}
