use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Combines all values with `f` and emits the result once the upstream
  /// completes. The first value seeds the accumulator, so an empty upstream
  /// completes without emitting.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut sum = None;
  /// Flux::<i64>::from_range(1, 4).reduce(|acc, v| acc + v).subscribe(|v| sum = Some(v)).unwrap();
  /// assert_eq!(sum, Some(10));
  /// ```
  pub fn reduce<F>(self, f: F) -> Self
  where
    F: Fn(Item, Item) -> Item + Send + Sync + 'static,
  {
    Self::new(move |emitter| {
      let fold = |acc: Option<Item>, v: Item| match acc {
        Some(acc) => Some(f(acc, v)),
        None => Some(v),
      };
      self.run(&mut FoldRelay::new(emitter, None::<Item>, &fold));
      Ok(())
    })
  }

  /// Combines all values with `f`, starting from `initial`. An empty upstream
  /// emits `initial`.
  pub fn reduce_initial<B, F>(self, initial: B, f: F) -> Flux<B, Err>
  where
    B: Clone + Send + Sync + 'static,
    F: Fn(B, Item) -> B + Send + Sync + 'static,
  {
    Flux::<B, Err>::new(move |emitter| {
      let fold = |acc: Option<B>, v: Item| acc.map(|acc| f(acc, v));
      self.run(&mut FoldRelay::new(emitter, Some(initial.clone()), &fold));
      Ok(())
    })
  }
}

/// Accumulates every value and emits the accumulator, if any, right before
/// completing. Shared by the reducing and collecting operators.
pub(crate) struct FoldRelay<'a, D: ?Sized, B, F> {
  downstream: &'a mut D,
  acc: Option<B>,
  fold: &'a F,
}

impl<'a, D: ?Sized, B, F> FoldRelay<'a, D, B, F> {
  pub(crate) fn new(downstream: &'a mut D, acc: Option<B>, fold: &'a F) -> Self {
    Self { downstream, acc, fold }
  }
}

impl<Item, B, Err, D, F> Emitter<Item, Err> for FoldRelay<'_, D, B, F>
where
  D: Emitter<B, Err> + ?Sized,
  F: Fn(Option<B>, Item) -> Option<B>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.acc = (self.fold)(self.acc.take(), value); }

  #[inline]
  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    if let Some(acc) = self.acc.take() {
      self.downstream.next(acc);
    }
    self.downstream.complete();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}
