//! Default error type carried by the error channel of a [`Flux`].
//!
//! Any type can travel through the error channel; `Fault` is what the
//! factories and the examples use when nothing more specific is needed.
//!
//! [`Flux`]: crate::flux::Flux

use thiserror::Error;

/// A producer or transform fault.
///
/// ```
/// use rxflux::prelude::*;
///
/// let flux = Flux::<i32>::failed(Fault::new("Spiderman"));
/// let err = flux.subscribe(|_| {}).unwrap_err();
/// assert_eq!(err.message(), "Spiderman");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{message}")]
pub struct Fault {
  message: String,
}

impl Fault {
  pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }

  /// A fault for operations invoked while the receiver is in a state that
  /// does not allow them.
  pub fn illegal_state() -> Self { Self::new("illegal state") }

  #[inline]
  pub fn message(&self) -> &str { &self.message }
}

impl From<&str> for Fault {
  fn from(message: &str) -> Self { Self::new(message) }
}

impl From<String> for Fault {
  fn from(message: String) -> Self { Self::new(message) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxflux_macro::test]
  fn display_is_the_message() {
    let fault = Fault::new("Spiderman");
    assert_eq!(fault.to_string(), "Spiderman");
    assert_eq!(Fault::from("Spiderman"), fault);
  }

  #[rxflux_macro::test]
  fn illegal_state_has_a_message() {
    assert_eq!(Fault::illegal_state().message(), "illegal state");
  }
}
