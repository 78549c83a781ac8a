use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Transforms every value with `f`.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut values = vec![];
  /// Flux::<i64>::from_range(1, 3)
  ///   .map(|v| v * 10)
  ///   .subscribe(|v| values.push(v))
  ///   .unwrap();
  /// assert_eq!(values, vec![10, 20, 30]);
  /// ```
  pub fn map<B, F>(self, f: F) -> Flux<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> B + Send + Sync + 'static,
  {
    Flux::<B, Err>::new(move |emitter| {
      self.run(&mut MapRelay { downstream: emitter, map: &f });
      Ok(())
    })
  }

  /// Like [`Flux::map`], but `f` may fail. The first `Err` is sent downstream
  /// as an error signal and the upstream is told to stop.
  pub fn try_map<B, F>(self, f: F) -> Flux<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Result<B, Err> + Send + Sync + 'static,
  {
    Flux::<B, Err>::new(move |emitter| {
      self.run(&mut TryMapRelay { downstream: emitter, map: &f, failed: false });
      Ok(())
    })
  }
}

struct MapRelay<'a, D: ?Sized, F> {
  downstream: &'a mut D,
  map: &'a F,
}

impl<Item, B, Err, D, F> Emitter<Item, Err> for MapRelay<'_, D, F>
where
  D: Emitter<B, Err> + ?Sized,
  F: Fn(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.downstream.next((self.map)(value)) }

  #[inline]
  fn error(&mut self, err: Err) { self.downstream.error(err) }

  #[inline]
  fn complete(&mut self) { self.downstream.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

struct TryMapRelay<'a, D: ?Sized, F> {
  downstream: &'a mut D,
  map: &'a F,
  failed: bool,
}

impl<Item, B, Err, D, F> Emitter<Item, Err> for TryMapRelay<'_, D, F>
where
  D: Emitter<B, Err> + ?Sized,
  F: Fn(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.failed {
      return;
    }
    match (self.map)(value) {
      Ok(value) => self.downstream.next(value),
      Err(err) => {
        self.failed = true;
        self.downstream.error(err);
      }
    }
  }

  fn error(&mut self, err: Err) {
    if !self.failed {
      self.downstream.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.failed {
      self.downstream.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.failed || self.downstream.is_closed() }
}
