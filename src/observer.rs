//! Signals, and the two sides that exchange them.
//!
//! A producer talks to an [`Emitter`]; a consumer is an [`Observer`]. The
//! engine sits in between: it guards emitters so that nothing follows a
//! terminal signal, and adapts closures into observers.

// ============================================================================
// Signal
// ============================================================================

/// One notification travelling from a producer to a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

impl<Item, Err> Signal<Item, Err> {
  /// `Error` and `Complete` end a subscription.
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Signal::Next(_)) }
}

// ============================================================================
// Emitter Trait
// ============================================================================

/// The producer-facing handle.
///
/// Build functions receive `&mut dyn Emitter<Item, Err>`, so a stream's type
/// never mentions the concrete consumer behind it (a relay of some operator,
/// a broadcasting hub, or the closure given to `subscribe`).
///
/// Every method takes `&mut self`: unlike [`Observer`], an emitter stays
/// usable after a terminal call, later calls simply do nothing.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);

  fn error(&mut self, err: Err);

  fn complete(&mut self);

  /// `true` once nothing downstream wants more values.
  ///
  /// Producers should poll this between emissions; it is the only way a
  /// cancellation (for example from `take`) reaches them.
  fn is_closed(&self) -> bool;

  /// Routes a [`Signal`] to the matching method.
  fn emit(&mut self, signal: Signal<Item, Err>) {
    match signal {
      Signal::Next(value) => self.next(value),
      Signal::Error(err) => self.error(err),
      Signal::Complete => self.complete(),
    }
  }
}

// ============================================================================
// Observer Trait
// ============================================================================

/// The consumer of a stream.
///
/// `error` and `complete` consume the observer: after a terminal signal there
/// is nothing left to call.
pub trait Observer<Item, Err> {
  fn next(&mut self, value: Item);

  /// Handles an error.
  ///
  /// An observer without an error handler hands the error back as `Err`, the
  /// engine then returns it from the call that delivered it.
  fn error(self, err: Err) -> Result<(), Err>;

  fn complete(self);

  /// Lets an observer stop the stream on its own, e.g. after it has seen
  /// enough values.
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Object-safe mirror of [`Observer`], used where observers of different
/// types are stored together (the subscriber list of a connectable stream).
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err) -> Result<(), Err>;
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) -> Result<(), Err> { (*self).error(err) }
  fn box_complete(self: Box<Self>) { (*self).complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer that can be handed to another thread.
pub type BoxedObserverSend<'a, Item, Err> = Box<dyn DynObserver<Item, Err> + Send + 'a>;

impl<'a, Item, Err> Observer<Item, Err> for BoxedObserverSend<'a, Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) -> Result<(), Err> { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Next-only observer built from a closure.
///
/// It has no error handler: an error is handed back to the engine.
#[derive(Clone)]
pub struct FnMutObserver<N>(pub N);

impl<N, Item, Err> Observer<Item, Err> for FnMutObserver<N>
where
  N: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(value); }

  #[inline]
  fn error(self, err: Err) -> Result<(), Err> { Err(err) }

  #[inline]
  fn complete(self) {}
}

/// Observer with a value handler and an error handler.
#[derive(Clone)]
pub struct ObserverErr<N, E> {
  pub next: N,
  pub error: E,
}

impl<N, E, Item, Err> Observer<Item, Err> for ObserverErr<N, E>
where
  N: FnMut(Item),
  E: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  fn error(self, err: Err) -> Result<(), Err> {
    (self.error)(err);
    Ok(())
  }

  #[inline]
  fn complete(self) {}
}

/// Observer with value, error and completion handlers.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<N, E, C, Item, Err> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  fn error(self, err: Err) -> Result<(), Err> {
    (self.error)(err);
    Ok(())
  }

  fn complete(self) { (self.complete)(); }
}

// ============================================================================
// Tests
// ============================================================================
