//! Operators.
//!
//! Every operator is an inherent method of [`Flux`](crate::flux::Flux) that
//! takes the stream by value and returns a new one. The returned stream runs
//! its upstream with a relay emitter in front of the downstream one; the
//! relay holds the operator's state, so each subscription starts fresh.
//!
//! Relays that are done (a `take` that reached its count, a `try_map` whose
//! transform failed) report themselves closed, which is how the upstream
//! producer learns it should stop.

mod collect;
mod distinct;
mod filter;
mod map;
mod reduce;
mod take;
mod zip;
