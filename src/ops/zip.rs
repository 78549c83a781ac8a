//! Pairwise combination of two streams.

use std::collections::VecDeque;

use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Pairs the n-th value of `self` with the n-th value of `other` and emits
  /// `combiner(a, b)`.
  ///
  /// Both sources run on the subscribing thread, `self` first, then `other`;
  /// values wait in a per-source buffer until they can be paired. The result
  /// completes as soon as one source has completed and its buffer is empty,
  /// at which point the source still running is told to stop. A build
  /// function that returns without completing counts as exhausted. An error
  /// from either source ends the result with that error.
  ///
  /// # Hangs
  ///
  /// `self` is run to its end before `other` starts, and everything it emits
  /// is buffered meanwhile. An unbounded `self` therefore never returns and
  /// keeps allocating, whatever `other` is. Put the unbounded source, if any,
  /// on the `other` side: it is stopped as soon as the buffered values of
  /// `self` are paired.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut values = vec![];
  /// Flux::<&str>::from_values(["a", "b"])
  ///   .zip(Flux::from_range(0, i64::MAX), |s, i| format!("{i}{s}"))
  ///   .subscribe(|v| values.push(v))
  ///   .unwrap();
  /// assert_eq!(values, vec!["0a", "1b"]);
  /// ```
  pub fn zip<U, R, F>(self, other: Flux<U, Err>, combiner: F) -> Flux<R, Err>
  where
    U: 'static,
    R: 'static,
    F: Fn(Item, U) -> R + Send + Sync + 'static,
  {
    Flux::<R, Err>::new(move |emitter| {
      let mut state = ZipState::<Item, U>::new();
      self.run(&mut ZipLeft { state: &mut state, downstream: &mut *emitter, combiner: &combiner });
      state.left_done = true;
      state.drain(&mut *emitter, &combiner);

      if !state.finished {
        other.run(&mut ZipRight {
          state: &mut state,
          downstream: &mut *emitter,
          combiner: &combiner,
        });
        state.right_done = true;
        state.drain(&mut *emitter, &combiner);
      }
      Ok(())
    })
  }
}

struct ZipState<A, B> {
  left: VecDeque<A>,
  right: VecDeque<B>,
  left_done: bool,
  right_done: bool,
  finished: bool,
}

impl<A, B> ZipState<A, B> {
  fn new() -> Self {
    Self {
      left: VecDeque::new(),
      right: VecDeque::new(),
      left_done: false,
      right_done: false,
      finished: false,
    }
  }

  /// Emits every pair that can be formed, then completes downstream once no
  /// further pair can be.
  fn drain<R, Err, D, F>(&mut self, downstream: &mut D, combiner: &F)
  where
    D: Emitter<R, Err> + ?Sized,
    F: Fn(A, B) -> R,
  {
    if self.finished {
      return;
    }
    while !self.left.is_empty() && !self.right.is_empty() {
      if let (Some(a), Some(b)) = (self.left.pop_front(), self.right.pop_front()) {
        downstream.next(combiner(a, b));
      }
    }

    let exhausted = (self.left_done && self.left.is_empty())
      || (self.right_done && self.right.is_empty());
    if exhausted {
      self.finished = true;
      downstream.complete();
    }
  }

  fn fail<R, Err, D>(&mut self, downstream: &mut D, err: Err)
  where
    D: Emitter<R, Err> + ?Sized,
  {
    if !self.finished {
      self.finished = true;
      downstream.error(err);
    }
  }
}

struct ZipLeft<'a, A, B, D: ?Sized, F> {
  state: &'a mut ZipState<A, B>,
  downstream: &'a mut D,
  combiner: &'a F,
}

impl<A, B, R, Err, D, F> Emitter<A, Err> for ZipLeft<'_, A, B, D, F>
where
  D: Emitter<R, Err> + ?Sized,
  F: Fn(A, B) -> R,
{
  fn next(&mut self, value: A) {
    if !self.state.finished {
      self.state.left.push_back(value);
      self.state.drain(&mut *self.downstream, self.combiner);
    }
  }

  fn error(&mut self, err: Err) { self.state.fail(&mut *self.downstream, err) }

  fn complete(&mut self) {
    self.state.left_done = true;
    self.state.drain(&mut *self.downstream, self.combiner);
  }

  #[inline]
  fn is_closed(&self) -> bool { self.state.finished || self.downstream.is_closed() }
}

struct ZipRight<'a, A, B, D: ?Sized, F> {
  state: &'a mut ZipState<A, B>,
  downstream: &'a mut D,
  combiner: &'a F,
}

impl<A, B, R, Err, D, F> Emitter<B, Err> for ZipRight<'_, A, B, D, F>
where
  D: Emitter<R, Err> + ?Sized,
  F: Fn(A, B) -> R,
{
  fn next(&mut self, value: B) {
    if !self.state.finished {
      self.state.right.push_back(value);
      self.state.drain(&mut *self.downstream, self.combiner);
    }
  }

  fn error(&mut self, err: Err) { self.state.fail(&mut *self.downstream, err) }

  fn complete(&mut self) {
    self.state.right_done = true;
    self.state.drain(&mut *self.downstream, self.combiner);
  }

  #[inline]
  fn is_closed(&self) -> bool { self.state.finished || self.downstream.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  use crate::prelude::*;

  #[rxflux_macro::test]
  fn zip_basic() {
    let mut values = vec![];
    Flux::<i32>::from_values([1, 2, 3])
      .zip(Flux::from_values([4, 5, 6]), |a, b| (a, b))
      .subscribe(|v| values.push(v))
      .unwrap();
    assert_eq!(values, vec![(1, 4), (2, 5), (3, 6)]);
  }

  #[rxflux_macro::test]
  fn zip_different_lengths() {
    let mut values = vec![];
    let mut completed = false;
    Flux::<i32>::from_values([1, 2, 3, 4, 5])
      .zip(Flux::from_values([10, 20, 30]), |a, b| (a, b))
      .subscribe_all(|v| values.push(v), |_| {}, || completed = true);

    assert_eq!(values, vec![(1, 10), (2, 20), (3, 30)]);
    assert!(completed);
  }

  #[rxflux_macro::test]
  fn zip_stops_an_endless_right_side() {
    let heroes = Flux::<String>::from_values(
      ["Batman", "Superman", "Wonder Woman"].map(String::from),
    );
    let mut values = vec![];
    heroes
      .zip(Flux::from_range(0, i32::MAX as i64), |hero, i| format!("{i}: {hero}"))
      .subscribe(|v| values.push(v))
      .unwrap();

    assert_eq!(values, vec!["0: Batman", "1: Superman", "2: Wonder Woman"]);
  }

  #[rxflux_macro::test]
  fn right_side_is_not_polled_past_the_last_pair() {
    let produced = Arc::new(AtomicUsize::new(0));
    let c_produced = produced.clone();
    let counter = Flux::<i64>::new(move |emitter| {
      let mut i = 0;
      while !emitter.is_closed() {
        c_produced.fetch_add(1, Ordering::SeqCst);
        emitter.next(i);
        i += 1;
      }
      Ok(())
    });

    let mut sum = 0;
    Flux::<i64>::from_range(0, 10)
      .zip(counter, |a, b| a + b)
      .subscribe(|v| sum += v)
      .unwrap();

    assert_eq!(sum, 90);
    assert_eq!(produced.load(Ordering::SeqCst), 10);
  }

  #[rxflux_macro::test]
  fn left_side_runs_to_its_end_first() {
    let log = Arc::new(Mutex::new(vec![]));
    let (c_left, c_right) = (log.clone(), log.clone());
    let left = Flux::<i32>::new(move |emitter| {
      for i in 0..3 {
        c_left.lock().unwrap().push(format!("left {i}"));
        emitter.next(i);
      }
      emitter.complete();
      Ok(())
    });
    let right = Flux::<i32>::new(move |emitter| {
      let mut i = 0;
      while !emitter.is_closed() {
        c_right.lock().unwrap().push(format!("right {i}"));
        emitter.next(i);
        i += 1;
      }
      Ok(())
    });

    let mut pairs = vec![];
    left.zip(right, |a, b| (a, b)).subscribe(|v| pairs.push(v)).unwrap();

    assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(
      *log.lock().unwrap(),
      vec!["left 0", "left 1", "left 2", "right 0", "right 1", "right 2"]
    );
  }

  #[rxflux_macro::test]
  fn empty_left_skips_the_right_side() {
    let mut completed = false;
    Flux::<i32>::empty()
      .zip(Flux::<i32>::new(|_| panic!("must not run")), |a, b| a + b)
      .subscribe_all(|_| panic!("no value"), |_| {}, || completed = true);
    assert!(completed);
  }

  #[rxflux_macro::test]
  fn error_from_the_right_side() {
    let mut values = vec![];
    let mut error = None;
    Flux::<i32>::from_values([1, 2, 3])
      .zip(
        Flux::new(|emitter| {
          emitter.next(10);
          Err(Fault::new("right side broke"))
        }),
        |a, b| a * b,
      )
      .subscribe_err(|v| values.push(v), |e| error = Some(e));

    assert_eq!(values, vec![10]);
    assert_eq!(error, Some(Fault::new("right side broke")));
  }

  #[rxflux_macro::test]
  fn error_from_the_left_side_skips_the_right() {
    let result = Flux::<i32>::failed(Fault::illegal_state())
      .zip(Flux::<i32>::new(|_| panic!("must not run")), |a, b| a + b)
      .subscribe(|_| {});
    assert_eq!(result.unwrap_err(), Fault::illegal_state());
  }
}
