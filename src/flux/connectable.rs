//! The hot publisher.
//!
//! A [`ConnectableFlux`] runs the build function of its source at most once,
//! when [`connect`](ConnectableFlux::connect) is first called, and broadcasts
//! every signal to the subscribers registered at that moment.
//!
//! # Key Concepts
//!
//! - **Silent until connected**: subscribing only registers the observer.
//! - **No replay**: a subscriber sees the signals emitted after it
//!   registered, nothing earlier. Once the source terminated, new subscribers
//!   receive the terminal signal right away.
//! - **One-shot**: a terminated source cannot be connected again.
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rxflux::prelude::*;
//!
//! let hot = Flux::<i32>::from_values([1, 2, 3]).connectable();
//!
//! let values = Arc::new(Mutex::new(vec![]));
//! let c_values = values.clone();
//! hot.subscribe(move |v| c_values.lock().unwrap().push(v)).unwrap();
//! assert!(values.lock().unwrap().is_empty());
//!
//! hot.connect().unwrap();
//! assert_eq!(*values.lock().unwrap(), vec![1, 2, 3]);
//! ```

use std::{
  mem,
  sync::{Arc, Mutex, Weak},
};

use super::Flux;
use crate::{
  observer::{
    BoxedObserverSend, Emitter, FnMutObserver, Observer, ObserverAll, ObserverErr, Signal,
  },
  subscriber::Subscriber,
  subscription::Subscription,
};

type HubSubscriber<Item, Err> = Subscriber<BoxedObserverSend<'static, Item, Err>, Err>;

enum ConnectState<Err> {
  Idle,
  Connected,
  Terminated(Result<(), Err>),
}

/// Subscriber list and connection state, always accessed under one lock.
///
/// Entries are keyed by an id so that a cancelled subscription can remove
/// its own entry.
struct Hub<Item, Err> {
  subscribers: Vec<(usize, HubSubscriber<Item, Err>)>,
  next_id: usize,
  state: ConnectState<Err>,
  had_subscribers: bool,
}

impl<Item, Err> Hub<Item, Err> {
  fn add(&mut self, subscriber: HubSubscriber<Item, Err>) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.had_subscribers = true;
    self.subscribers.push((id, subscriber));
    id
  }

  fn remove(&mut self, id: usize) -> Option<HubSubscriber<Item, Err>> {
    let idx = self.subscribers.iter().position(|(entry, _)| *entry == id)?;
    Some(self.subscribers.remove(idx).1)
  }
}

/// Teardown of a hub subscription: drops its entry, outside the lock.
fn remove_on_cancel<Item, Err>(hub: Weak<Mutex<Hub<Item, Err>>>, id: usize) {
  if let Some(hub) = hub.upgrade() {
    let removed = hub.lock().unwrap().remove(id);
    drop(removed);
  }
}

#[inline]
fn is_subscriber_closed<Item, Err>(subscriber: &HubSubscriber<Item, Err>) -> bool {
  <HubSubscriber<Item, Err> as Emitter<Item, Err>>::is_closed(subscriber)
}

/// A stream that multicasts one execution of its source.
///
/// Created by [`Flux::connectable`]. Clones share the same source execution
/// and subscriber list.
pub struct ConnectableFlux<Item, Err> {
  source: Flux<Item, Err>,
  hub: Arc<Mutex<Hub<Item, Err>>>,
  connection: Subscription,
}

impl<Item, Err> Clone for ConnectableFlux<Item, Err> {
  fn clone(&self) -> Self {
    Self { source: self.source.clone(), hub: self.hub.clone(), connection: self.connection.clone() }
  }
}

impl<Item, Err> ConnectableFlux<Item, Err>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
{
  pub(crate) fn new(source: Flux<Item, Err>) -> Self {
    let hub = Hub {
      subscribers: Vec::new(),
      next_id: 0,
      state: ConnectState::Idle,
      had_subscribers: false,
    };
    Self { source, hub: Arc::new(Mutex::new(hub)), connection: Subscription::new() }
  }

  /// Registers a value handler.
  ///
  /// Returns `Err` only when the source already failed: the error is
  /// delivered right away and there is no handler for it.
  pub fn subscribe<N>(&self, next: N) -> Result<Subscription, Err>
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
  {
    self.attach(ObserverErr { next, error }).0
  }

  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
    E: FnOnce(Err) + Send + 'static,
    C: FnOnce() + Send + 'static,
  {
    self.attach(ObserverAll { next, error, complete }).0
  }

  pub fn subscribe_with<O>(&self, observer: O) -> Result<Subscription, Err>
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    match self.attach(observer) {
      (_, Some(err)) => Err(err),
      (subscription, None) => Ok(subscription),
    }
  }

  fn attach<O>(&self, observer: O) -> (Subscription, Option<Err>)
  where
    O: Observer<Item, Err> + Send + 'static,
  {
    let subscription = Subscription::new();
    let boxed: BoxedObserverSend<'static, Item, Err> = Box::new(observer);
    let mut subscriber = Subscriber::new(boxed, subscription.clone());

    let mut hub = self.hub.lock().unwrap();
    let terminal: Option<Signal<Item, Err>> = match &hub.state {
      ConnectState::Terminated(Ok(())) => Some(Signal::Complete),
      ConnectState::Terminated(Err(err)) => Some(Signal::Error(err.clone())),
      ConnectState::Idle | ConnectState::Connected => None,
    };
    match terminal {
      Some(signal) => {
        drop(hub);
        subscriber.deliver(signal);
        (subscription, subscriber.take_unhandled())
      }
      None => {
        let id = hub.add(subscriber);
        drop(hub);
        let hub = Arc::downgrade(&self.hub);
        subscription.add_teardown(move || remove_on_cancel(hub, id));
        (subscription, None)
      }
    }
  }

  /// Starts the source, once.
  ///
  /// The first call runs the build function on the calling thread and only
  /// returns when the producer stops. Any later call returns the connection
  /// handle right away; cancelling that handle asks a still running producer
  /// to stop.
  ///
  /// Returns `Err` when the source failed and the error reached a subscriber
  /// without an error handler.
  pub fn connect(&self) -> Result<Subscription, Err> {
    {
      let mut hub = self.hub.lock().unwrap();
      if !matches!(hub.state, ConnectState::Idle) {
        return Ok(self.connection.clone());
      }
      hub.state = ConnectState::Connected;
      tracing::debug!(subscribers = hub.subscribers.len(), "connecting hot source");
    }

    let mut broadcaster =
      Broadcaster { hub: &self.hub, connection: &self.connection, unhandled: None };
    self.source.run(&mut broadcaster);
    broadcaster.finish();

    match broadcaster.unhandled.take() {
      Some(err) => Err(err),
      None => Ok(self.connection.clone()),
    }
  }

  /// `true` once `connect` has been called.
  pub fn is_connected(&self) -> bool {
    !matches!(self.hub.lock().unwrap().state, ConnectState::Idle)
  }
}

/// The emitter handed to the source's build function on connect.
struct Broadcaster<'a, Item, Err> {
  hub: &'a Mutex<Hub<Item, Err>>,
  connection: &'a Subscription,
  unhandled: Option<Err>,
}

impl<Item, Err> Broadcaster<'_, Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  /// Delivers `signal` to `subscribers` cloning it for all but the last one,
  /// then keeps only the subscribers still open.
  fn deliver(
    &mut self,
    subscribers: &mut Vec<(usize, HubSubscriber<Item, Err>)>,
    signal: Signal<Item, Err>,
  ) {
    subscribers.retain(|(_, s)| !is_subscriber_closed(s));
    let mut iter = subscribers.iter_mut().peekable();
    while let Some((_, subscriber)) = iter.next() {
      if iter.peek().is_some() {
        subscriber.deliver(signal.clone());
      } else {
        subscriber.deliver(signal);
        break;
      }
    }
    for (_, subscriber) in subscribers.iter_mut() {
      if let Some(err) = subscriber.take_unhandled() {
        self.unhandled.get_or_insert(err);
      }
    }
    subscribers.retain(|(_, s)| !is_subscriber_closed(s));
  }

  fn broadcast_value(&mut self, value: Item) {
    if self.connection.is_closed() {
      return;
    }
    // Delivery happens outside the lock so that callbacks may subscribe.
    // Subscribers added meanwhile go after the current ones.
    let mut subscribers = mem::take(&mut self.hub.lock().unwrap().subscribers);
    self.deliver(&mut subscribers, Signal::Next(value));
    let mut hub = self.hub.lock().unwrap();
    subscribers.append(&mut hub.subscribers);
    hub.subscribers = subscribers;
  }

  fn terminate(&mut self, outcome: Result<(), Err>) {
    let mut subscribers = {
      let mut hub = self.hub.lock().unwrap();
      hub.state = ConnectState::Terminated(outcome.clone());
      mem::take(&mut hub.subscribers)
    };
    tracing::debug!(
      subscribers = subscribers.len(),
      failed = outcome.is_err(),
      "hot source terminated"
    );
    let signal = match outcome {
      Ok(()) => Signal::Complete,
      Err(err) => Signal::Error(err),
    };
    self.deliver(&mut subscribers, signal);
  }

  /// A producer that returned without a terminal signal counts as completed:
  /// the subscribers still registered, and any later ones, get `complete`.
  fn finish(&mut self) {
    let stopped = matches!(self.hub.lock().unwrap().state, ConnectState::Connected);
    if stopped {
      tracing::debug!("hot source returned without a terminal signal");
      self.terminate(Ok(()));
    }
  }
}

impl<Item, Err> Emitter<Item, Err> for Broadcaster<'_, Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) { self.broadcast_value(value); }

  fn error(&mut self, err: Err) { self.terminate(Err(err)); }

  fn complete(&mut self) { self.terminate(Ok(())); }

  fn is_closed(&self) -> bool {
    if self.connection.is_closed() {
      return true;
    }
    let hub = self.hub.lock().unwrap();
    matches!(hub.state, ConnectState::Terminated(_))
      || (hub.had_subscribers && hub.subscribers.iter().all(|(_, s)| is_subscriber_closed(s)))
  }
}
