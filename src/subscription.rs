//! Cancellation handles.

use smallvec::SmallVec;
use std::{
  fmt::{Debug, Formatter},
  mem,
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
};

type Teardown = Box<dyn FnOnce() + Send>;

/// Handle of one attachment between a producer and a consumer.
///
/// Clones share the same state. A subscription closes when the consumer
/// cancels it or when a terminal signal was delivered; closing runs the
/// registered teardowns exactly once.
#[derive(Clone, Default)]
pub struct Subscription(Arc<Inner>);

#[derive(Default)]
struct Inner {
  closed: AtomicBool,
  teardown: Mutex<SmallVec<[Teardown; 1]>>,
}

impl Subscription {
  pub fn new() -> Self { Self::default() }

  /// Stops further signal delivery. Idempotent.
  ///
  /// Producers are not interrupted; they observe the cancellation through
  /// `Emitter::is_closed` and are expected to stop emitting.
  pub fn cancel(&self) {
    if self.close() {
      tracing::trace!("subscription cancelled");
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.closed.load(Ordering::Acquire) }

  /// Registers a callback run when this subscription closes. Runs it right
  /// away if the subscription is already closed.
  pub fn add_teardown(&self, teardown: impl FnOnce() + Send + 'static) {
    let mut list = self.0.teardown.lock().unwrap();
    if self.is_closed() {
      drop(list);
      teardown();
    } else {
      list.push(Box::new(teardown));
    }
  }

  /// Ties `child` to this subscription: closing `self` cancels `child`.
  pub fn add(&self, child: Subscription) {
    if !Arc::ptr_eq(&self.0, &child.0) {
      self.add_teardown(move || child.cancel());
    }
  }

  /// Activates "RAII" behavior for this subscription: it is cancelled as soon
  /// as the returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `cancel()` is called immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard(self) }

  /// Closes the subscription, returns `false` if it was closed already.
  pub(crate) fn close(&self) -> bool {
    if self.0.closed.swap(true, Ordering::AcqRel) {
      return false;
    }
    let teardown = mem::take(&mut *self.0.teardown.lock().unwrap());
    for f in teardown {
      f();
    }
    true
  }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_closed", &self.is_closed())
      .field("teardown_count", &self.0.teardown.lock().unwrap().len())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be cancelled.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> Self { SubscriptionGuard(subscription) }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.cancel() }
}
