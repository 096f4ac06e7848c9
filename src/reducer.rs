//! State reduction trait: how events produce new snapshots.

/// Reduce an event and the current snapshot to the next snapshot.
///
/// All state changes go through this function. Implementations never mutate
/// the current snapshot — they build a new value, usually by struct update
/// syntax over a clone, carrying unrelated fields over unchanged:
///
/// ```rust
/// use sliver::Reducer;
///
/// #[derive(Clone)]
/// struct Model { count: u64 }
///
/// enum Event { Increment }
///
/// struct Logic;
///
/// impl Reducer<Event, Model> for Logic {
///     fn reduce(&self, event: Event, model: &Model) -> Model {
///         match event {
///             Event::Increment => Model {
///                 count: model.count + 1,
///                 ..model.clone()
///             },
///         }
///     }
/// }
/// ```
///
/// Reduction is total: there is no failure mode, and every event produces a
/// snapshot.
pub trait Reducer<Event: Send, State> {
    /// Produce the next snapshot.
    fn reduce(&self, event: Event, state: &State) -> State;
}
