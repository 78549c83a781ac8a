use crate::{
  observer::{Emitter, Observer, Signal},
  subscription::Subscription,
};

/// The end of a chain: turns signals into observer calls for one
/// subscription.
///
/// Nothing reaches the observer after its subscription closed, whether by
/// cancellation or because a terminal signal was delivered. An error the
/// observer refuses to handle is kept until the engine returns it to the
/// caller.
pub(crate) struct Subscriber<O, Err> {
  observer: Option<O>,
  subscription: Subscription,
  unhandled: Option<Err>,
}

impl<O, Err> Subscriber<O, Err> {
  pub(crate) fn new(observer: O, subscription: Subscription) -> Self {
    Self { observer: Some(observer), subscription, unhandled: None }
  }

  #[inline]
  pub(crate) fn subscription(&self) -> &Subscription { &self.subscription }

  /// Takes the error the observer declined, if any.
  #[inline]
  pub(crate) fn take_unhandled(&mut self) -> Option<Err> { self.unhandled.take() }

  pub(crate) fn deliver<Item>(&mut self, signal: Signal<Item, Err>)
  where
    O: Observer<Item, Err>,
  {
    if self.subscription.is_closed() {
      self.observer = None;
      return;
    }
    match signal {
      Signal::Next(value) => {
        if let Some(observer) = self.observer.as_mut() {
          observer.next(value);
        }
      }
      Signal::Error(err) => {
        if let Some(observer) = self.observer.take() {
          self.subscription.close();
          if let Err(err) = observer.error(err) {
            self.unhandled = Some(err);
          }
        }
      }
      Signal::Complete => {
        if let Some(observer) = self.observer.take() {
          self.subscription.close();
          observer.complete();
        }
      }
    }
  }
}

impl<O, Item, Err> Emitter<Item, Err> for Subscriber<O, Err>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.deliver(Signal::Next(value)); }

  #[inline]
  fn error(&mut self, err: Err) { self.deliver(Signal::Error(err)); }

  #[inline]
  fn complete(&mut self) { self.deliver(Signal::Complete); }

  fn is_closed(&self) -> bool {
    self.subscription.is_closed() || self.observer.as_ref().map_or(true, |o| o.is_closed())
  }
}
