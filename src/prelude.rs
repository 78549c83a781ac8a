//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Error type
pub use crate::error::Fault;
// Streams
pub use crate::flux::{ConnectableFlux, Flux};
// Observer side
pub use crate::observer::{
  BoxedObserverSend, DynObserver, Emitter, FnMutObserver, Observer, ObserverAll, ObserverErr,
  Signal,
};
// Subscription
pub use crate::subscription::*;
