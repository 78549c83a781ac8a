//! The cold publisher.
//!
//! A [`Flux`] is a description of how to produce values. Nothing happens
//! until it is subscribed; then its build function runs on the subscribing
//! thread, once per subscription, and pushes signals into the emitter it is
//! given.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxflux::prelude::*;
//!
//! let doubled = Flux::<i64>::from_range(1, 4).map(|v| v * 2);
//!
//! let values = Rc::new(RefCell::new(vec![]));
//! let c_values = values.clone();
//! doubled.subscribe(move |v| c_values.borrow_mut().push(v)).unwrap();
//!
//! assert_eq!(*values.borrow(), vec![2, 4, 6, 8]);
//! ```

mod connectable;
mod create;
mod from_iter;
mod trivial;

use std::sync::Arc;

pub use connectable::ConnectableFlux;
use create::GuardedEmitter;

use crate::{
  error::Fault,
  observer::{Emitter, FnMutObserver, Observer, ObserverAll, ObserverErr},
  subscriber::Subscriber,
  subscription::Subscription,
};

type BuildFn<Item, Err> = dyn Fn(&mut dyn Emitter<Item, Err>) -> Result<(), Err> + Send + Sync;

/// A cold stream of `Item`s that may fail with `Err`.
///
/// Cloning is cheap and clones describe the same stream. Operators take the
/// stream by value and return a new one; keep a clone to subscribe to the
/// intermediate stream as well.
pub struct Flux<Item, Err = Fault> {
  build: Arc<BuildFn<Item, Err>>,
}

impl<Item, Err> Clone for Flux<Item, Err> {
  fn clone(&self) -> Self { Self { build: self.build.clone() } }
}

impl<Item, Err> Flux<Item, Err> {
  /// Runs the build function once against `emitter`.
  ///
  /// This is how operators attach to their upstream: the relay they pass in
  /// sees the upstream signals, guarded so that nothing follows a terminal
  /// one. A fault returned by the build function becomes an error signal.
  pub(crate) fn run(&self, emitter: &mut dyn Emitter<Item, Err>) {
    let mut guarded = GuardedEmitter::new(emitter);
    if let Err(err) = (self.build)(&mut guarded) {
      guarded.error(err);
    }
  }

  /// Subscribes with a value handler only.
  ///
  /// The stream runs to its end (or until it stops emitting) before this
  /// returns. An error signal has nowhere to go, so it is returned as `Err`;
  /// the values delivered before it are kept.
  pub fn subscribe<N>(&self, next: N) -> Result<Subscription, Err>
  where
    N: FnMut(Item),
  {
    self.subscribe_with(FnMutObserver(next))
  }

  /// Subscribes with a value handler and an error handler.
  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item),
    E: FnOnce(Err),
  {
    self.attach(ObserverErr { next, error }).0
  }

  /// Subscribes with value, error and completion handlers.
  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
  {
    self.attach(ObserverAll { next, error, complete }).0
  }

  /// Subscribes any [`Observer`]. Errors the observer hands back are returned
  /// as `Err`.
  pub fn subscribe_with<O>(&self, observer: O) -> Result<Subscription, Err>
  where
    O: Observer<Item, Err>,
  {
    match self.attach(observer) {
      (_, Some(err)) => Err(err),
      (subscription, None) => Ok(subscription),
    }
  }

  fn attach<O>(&self, observer: O) -> (Subscription, Option<Err>)
  where
    O: Observer<Item, Err>,
  {
    let mut subscriber = Subscriber::new(observer, Subscription::new());
    self.run(&mut subscriber);
    let unhandled = subscriber.take_unhandled();
    (subscriber.subscription().clone(), unhandled)
  }
}

impl<Item, Err> Flux<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  /// Turns this cold stream into a hot one: the build function will run at
  /// most once, on [`ConnectableFlux::connect`], and its signals are
  /// broadcast to every subscriber registered at that time.
  pub fn connectable(self) -> ConnectableFlux<Item, Err> { ConnectableFlux::new(self) }

  /// Alias of [`Flux::connectable`].
  #[inline]
  pub fn publish(self) -> ConnectableFlux<Item, Err> { self.connectable() }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::RefCell,
    rc::Rc,
    sync::{
      atomic::{AtomicUsize, Ordering},
      Arc, Mutex,
    },
    thread,
    time::{Duration, Instant},
  };

  use crate::prelude::*;

  fn capture<T>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T)) {
    let values = Rc::new(RefCell::new(Vec::new()));
    let c_values = values.clone();
    (values, move |v| c_values.borrow_mut().push(v))
  }

  #[rxflux_macro::test]
  fn construction_is_lazy() {
    let start = Instant::now();

    let _flux = Flux::<i32>::from_builder(|emitter| {
      thread::sleep(Duration::from_secs(5));
      emitter.next(1);
      Ok(())
    });

    assert!(start.elapsed() < Duration::from_secs(1));
  }

  #[rxflux_macro::test]
  fn build_runs_once_per_subscription() {
    let runs = Arc::new(AtomicUsize::new(0));
    let c_runs = runs.clone();
    let flux = Flux::<i32>::new(move |emitter| {
      c_runs.fetch_add(1, Ordering::SeqCst);
      emitter.next(1);
      emitter.complete();
      Ok(())
    });
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    flux.subscribe(|_| {}).unwrap();
    flux.subscribe(|_| {}).unwrap();
    assert_eq!(runs.load(Ordering::SeqCst), 2);
  }

  #[rxflux_macro::test]
  fn two_subscribers_see_the_full_sequence() {
    let flux = Flux::<i64>::from_range(1, 5);
    let (first, on_first) = capture();
    let (second, on_second) = capture();

    flux.subscribe(on_first).unwrap();
    flux.subscribe(on_second).unwrap();

    assert_eq!(*first.borrow(), vec![1, 2, 3, 4, 5]);
    assert_eq!(*second.borrow(), vec![1, 2, 3, 4, 5]);
  }

  #[rxflux_macro::test]
  fn values_before_a_fault_are_kept() {
    let flux = Flux::<&str>::from_builder(|emitter| {
      emitter.next("Batman");
      emitter.next("Green Lantern");
      Err(Fault::new("Spiderman"))
    });
    let (elements, on_next) = capture();
    let errors = Rc::new(RefCell::new(Vec::<Fault>::new()));
    let c_errors = errors.clone();

    flux.subscribe_err(on_next, move |e| c_errors.borrow_mut().push(e));

    assert_eq!(*elements.borrow(), vec!["Batman", "Green Lantern"]);
    assert_eq!(errors.borrow()[0].message(), "Spiderman");
  }

  #[rxflux_macro::test]
  fn unhandled_error_is_returned() {
    let (elements, on_next) = capture();
    let result = Flux::<i32>::from_builder(|emitter| {
      emitter.next(1);
      emitter.error(Fault::illegal_state());
      Ok(())
    })
    .subscribe(on_next);

    assert_eq!(result.unwrap_err(), Fault::illegal_state());
    assert_eq!(*elements.borrow(), vec![1]);
  }

  #[rxflux_macro::test]
  fn nothing_follows_a_terminal_signal() {
    let (elements, on_next) = capture();
    let completed = Rc::new(RefCell::new(0));
    let c_completed = completed.clone();

    let subscription = Flux::<i32>::from_builder(|emitter| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
      emitter.next(3);
      emitter.error(Fault::new("never dispatched"));
      Err(Fault::new("dropped as well"))
    })
    .subscribe_all(
      on_next,
      |e| panic!("unexpected error {e}"),
      move || *c_completed.borrow_mut() += 1,
    );

    assert_eq!(*elements.borrow(), vec![1, 2]);
    assert_eq!(*completed.borrow(), 1);
    assert!(subscription.is_closed());
  }

  #[rxflux_macro::test]
  fn emitter_reports_closed_after_terminal() {
    let seen = Arc::new(Mutex::new(vec![]));
    let c_seen = seen.clone();
    Flux::<i32>::new(move |emitter| {
      c_seen.lock().unwrap().push(emitter.is_closed());
      emitter.complete();
      c_seen.lock().unwrap().push(emitter.is_closed());
      Ok(())
    })
    .subscribe(|_| {})
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![false, true]);
  }

  struct FirstN {
    limit: usize,
    seen: Rc<RefCell<Vec<i64>>>,
  }

  impl Observer<i64, Fault> for FirstN {
    fn next(&mut self, value: i64) { self.seen.borrow_mut().push(value); }

    fn error(self, err: Fault) -> Result<(), Fault> { Err(err) }

    fn complete(self) {}

    fn is_closed(&self) -> bool { self.seen.borrow().len() >= self.limit }
  }

  #[rxflux_macro::test]
  fn observer_can_stop_an_infinite_producer() {
    let seen = Rc::new(RefCell::new(vec![]));
    let infinite = Flux::<i64>::from_builder(|emitter| {
      let mut i = 0;
      while !emitter.is_closed() {
        emitter.next(i);
        i += 1;
      }
      Ok(())
    });

    infinite.subscribe_with(FirstN { limit: 3, seen: seen.clone() }).unwrap();

    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
  }

  #[rxflux_macro::test]
  fn subscribe_from_several_threads() {
    let flux = Flux::<i64>::from_range(0, 100);
    let handles: Vec<_> = (0..4)
      .map(|_| {
        let flux = flux.clone();
        thread::spawn(move || {
          let mut sum = 0;
          flux.subscribe(|v| sum += v).unwrap();
          sum
        })
      })
      .collect();

    for handle in handles {
      assert_eq!(handle.join().unwrap(), 4950);
    }
  }
}
