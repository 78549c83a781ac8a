use std::sync::Arc;

use super::Flux;
use crate::observer::Emitter;

impl<Item, Err> Flux<Item, Err> {
  /// Creates a stream from its build function.
  ///
  /// The function runs once per subscription, on the subscribing thread. It
  /// pushes signals into the emitter and may return `Err` to fail the
  /// subscription; values emitted before the failure are delivered first.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut values = vec![];
  /// Flux::<i32>::new(|emitter| {
  ///   emitter.next(1);
  ///   emitter.next(2);
  ///   emitter.complete();
  ///   Ok(())
  /// })
  /// .subscribe(|v| values.push(v))
  /// .unwrap();
  ///
  /// assert_eq!(values, vec![1, 2]);
  /// ```
  pub fn new<F>(build: F) -> Self
  where
    F: Fn(&mut dyn Emitter<Item, Err>) -> Result<(), Err> + Send + Sync + 'static,
  {
    Self { build: Arc::new(build) }
  }

  /// Alias of [`Flux::new`].
  #[inline]
  pub fn from_builder<F>(build: F) -> Self
  where
    F: Fn(&mut dyn Emitter<Item, Err>) -> Result<(), Err> + Send + Sync + 'static,
  {
    Self::new(build)
  }
}

/// Wraps the emitter handed to a build function so that the first terminal
/// signal is also the last signal.
pub(crate) struct GuardedEmitter<'a, D: ?Sized> {
  inner: &'a mut D,
  terminated: bool,
}

impl<'a, D: ?Sized> GuardedEmitter<'a, D> {
  pub(crate) fn new(inner: &'a mut D) -> Self { Self { inner, terminated: false } }
}

impl<Item, Err, D> Emitter<Item, Err> for GuardedEmitter<'_, D>
where
  D: Emitter<Item, Err> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if !self.terminated {
      self.inner.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if self.terminated {
      tracing::debug!("error raised after the stream terminated, dropped");
    } else {
      self.terminated = true;
      self.inner.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.terminated {
      self.terminated = true;
      self.inner.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.terminated || self.inner.is_closed() }
}
