use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Forwards only the values `predicate` accepts.
  pub fn filter<F>(self, predicate: F) -> Self
  where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    Self::new(move |emitter| {
      self.run(&mut FilterRelay { downstream: emitter, predicate: &predicate });
      Ok(())
    })
  }
}

struct FilterRelay<'a, D: ?Sized, F> {
  downstream: &'a mut D,
  predicate: &'a F,
}

impl<Item, Err, D, F> Emitter<Item, Err> for FilterRelay<'_, D, F>
where
  D: Emitter<Item, Err> + ?Sized,
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.downstream.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) { self.downstream.error(err) }

  #[inline]
  fn complete(&mut self) { self.downstream.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}
