use super::Flux;

impl<Item, Err> Flux<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  /// Emits the given values in order, then completes.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut values = vec![];
  /// Flux::<i32>::from_values([1, 2, 3, 4]).subscribe(|v| values.push(v)).unwrap();
  /// assert_eq!(values, vec![1, 2, 3, 4]);
  /// ```
  pub fn from_values(values: impl IntoIterator<Item = Item>) -> Self
  where
    Item: Clone + Send + Sync,
  {
    let values: Vec<Item> = values.into_iter().collect();
    Self::from_sequence(values)
  }

  /// Emits the items of `sequence`, then completes.
  ///
  /// Every subscription iterates its own clone of `sequence`. Iteration stops
  /// as soon as downstream reports closed, so an unbounded iterator is fine
  /// behind a `take`.
  pub fn from_sequence<I>(sequence: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + Send + Sync + 'static,
  {
    Self::new(move |emitter| {
      for value in sequence.clone() {
        if emitter.is_closed() {
          return Ok(());
        }
        emitter.next(value);
      }
      emitter.complete();
      Ok(())
    })
  }
}

impl<Err: 'static> Flux<i64, Err> {
  /// Emits `count` consecutive integers starting at `start`, then completes.
  /// Emits nothing when `count <= 0` and stops after `i64::MAX`.
  pub fn from_range(start: i64, count: i64) -> Self {
    let count = count.max(0);
    let last = start.saturating_add(count.max(1) - 1);
    let len = usize::try_from(count).unwrap_or(usize::MAX);
    Self::from_sequence((start..=last).take(len))
  }
}
