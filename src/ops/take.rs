use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Emits at most the first `count` values, then completes.
  ///
  /// Once the count is reached the relay reports closed, so a producer that
  /// polls [`Emitter::is_closed`] stops right there; `take` makes an infinite
  /// source finite. `take(0)` completes without running the upstream.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let naturals = Flux::<i64>::new(|emitter| {
  ///   let mut n = 0;
  ///   while !emitter.is_closed() {
  ///     emitter.next(n);
  ///     n += 1;
  ///   }
  ///   Ok(())
  /// });
  ///
  /// let mut values = vec![];
  /// naturals.take(3).subscribe(|v| values.push(v)).unwrap();
  /// assert_eq!(values, vec![0, 1, 2]);
  /// ```
  pub fn take(self, count: usize) -> Self {
    Self::new(move |emitter| {
      if count == 0 {
        emitter.complete();
      } else {
        self.run(&mut TakeRelay { downstream: emitter, remaining: count });
      }
      Ok(())
    })
  }
}

struct TakeRelay<'a, D: ?Sized> {
  downstream: &'a mut D,
  remaining: usize,
}

impl<Item, Err, D> Emitter<Item, Err> for TakeRelay<'_, D>
where
  D: Emitter<Item, Err> + ?Sized,
{
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      return;
    }
    self.remaining -= 1;
    self.downstream.next(value);
    if self.remaining == 0 {
      tracing::trace!("take reached its count");
      self.downstream.complete();
    }
  }

  fn error(&mut self, err: Err) {
    if self.remaining > 0 {
      self.downstream.error(err);
    }
  }

  fn complete(&mut self) {
    if self.remaining > 0 {
      self.downstream.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.remaining == 0 || self.downstream.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
  };

  use crate::prelude::*;

  #[rxflux_macro::test]
  fn base_function() {
    let mut completed = false;
    let mut values = vec![];
    Flux::<i64>::from_range(0, 100).take(5).subscribe_all(
      |v| values.push(v),
      |_| {},
      || completed = true,
    );

    assert_eq!(values, vec![0, 1, 2, 3, 4]);
    assert!(completed);
  }

  #[rxflux_macro::test]
  fn stops_the_producer() {
    let produced = Arc::new(AtomicUsize::new(0));
    let saw_closed = Arc::new(AtomicBool::new(false));
    let (c_produced, c_saw_closed) = (produced.clone(), saw_closed.clone());

    let source = Flux::<i32>::new(move |emitter| {
      for i in 1..=6 {
        if emitter.is_closed() {
          c_saw_closed.store(true, Ordering::SeqCst);
          break;
        }
        c_produced.fetch_add(1, Ordering::SeqCst);
        emitter.next(i);
      }
      emitter.complete();
      Ok(())
    });

    let mut values = vec![];
    source.take(3).subscribe(|v| values.push(v)).unwrap();

    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(produced.load(Ordering::SeqCst), 3);
    assert!(saw_closed.load(Ordering::SeqCst));
  }

  #[rxflux_macro::test]
  fn shorter_source_completes_normally() {
    let mut values = vec![];
    let mut completed = 0;
    Flux::<i64>::from_range(0, 2).take(5).subscribe_all(
      |v| values.push(v),
      |_| {},
      || completed += 1,
    );

    assert_eq!(values, vec![0, 1]);
    assert_eq!(completed, 1);
  }

  #[rxflux_macro::test]
  fn take_zero_never_runs_the_source() {
    let ran = Arc::new(AtomicBool::new(false));
    let c_ran = ran.clone();
    let mut completed = false;

    Flux::<i32>::new(move |_| {
      c_ran.store(true, Ordering::SeqCst);
      Ok(())
    })
    .take(0)
    .subscribe_all(|_| panic!("no value"), |_| {}, || completed = true);

    assert!(completed);
    assert!(!ran.load(Ordering::SeqCst));
  }

  #[rxflux_macro::test]
  fn fault_after_the_count_is_dropped() {
    let mut values = vec![];
    Flux::<i32>::new(|emitter| {
      emitter.next(1);
      emitter.next(2);
      Err(Fault::new("late"))
    })
    .take(2)
    .subscribe(|v| values.push(v))
    .unwrap();

    assert_eq!(values, vec![1, 2]);
  }
}
