//! # rxflux: a push-based reactive stream engine
//!
//! Streams are built once and run on demand. A cold [`Flux`] runs its build
//! function on every subscription; a [`ConnectableFlux`] runs it once, on
//! `connect`, and broadcasts what it produces to everyone registered.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxflux::prelude::*;
//!
//! let mut values = vec![];
//! Flux::<i64>::from_range(0, 10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| values.push(v))
//!   .unwrap();
//!
//! assert_eq!(values, vec![0, 4, 8, 12, 16]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Flux`] | Cold stream; every subscription runs the build function again |
//! | [`ConnectableFlux`] | Hot stream; runs once on `connect`, no replay |
//! | [`Emitter`] | What a build function pushes `next`, `error` and `complete` into |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//!
//! ## Errors
//!
//! Errors travel in their own channel, typed by the stream's `Err` parameter
//! ([`Fault`] by default). An error that reaches a subscriber without an
//! error handler is not lost: `subscribe` (or `connect`, for a hot stream)
//! returns it as `Err`.
//!
//! ## Logging
//!
//! The engine reports connects, terminal broadcasts and cancellations through
//! [`tracing`](https://docs.rs/tracing). It never installs a subscriber.
//!
//! [`Flux`]: flux::Flux
//! [`ConnectableFlux`]: flux::ConnectableFlux
//! [`Emitter`]: observer::Emitter
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Fault`]: error::Fault

pub mod error;
pub mod flux;
pub mod observer;
pub mod ops;
pub mod prelude;
mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
