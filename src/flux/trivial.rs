use super::Flux;

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Completes right away without emitting.
  pub fn empty() -> Self {
    Self::new(|emitter| {
      emitter.complete();
      Ok(())
    })
  }

  /// Never emits and never terminates.
  pub fn never() -> Self { Self::new(|_| Ok(())) }

  /// Fails every subscription with `err` before emitting anything.
  ///
  /// ```
  /// use rxflux::prelude::*;
  ///
  /// let mut values = vec![];
  /// let result = Flux::<i32>::failed(Fault::illegal_state()).subscribe(|v| values.push(v));
  /// assert!(result.is_err());
  /// assert!(values.is_empty());
  /// ```
  pub fn failed(err: Err) -> Self
  where
    Err: Clone + Send + Sync,
  {
    Self::new(move |_| Err(err.clone()))
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[rxflux_macro::test]
  fn empty_completes() {
    let mut hits = 0;
    let mut completed = false;
    Flux::<i32>::empty().subscribe_all(|_| hits += 1, |_| {}, || completed = true);

    assert_eq!(hits, 0);
    assert!(completed);
  }

  #[rxflux_macro::test]
  fn never_stays_open() {
    let subscription = Flux::<i32>::never()
      .subscribe_all(|_| panic!("no value"), |_| panic!("no error"), || panic!("no completion"));
    assert!(!subscription.is_closed());
  }

  #[rxflux_macro::test]
  fn failed_reaches_error_handler() {
    let mut error = None;
    let subscription =
      Flux::<i32>::failed(Fault::new("bad")).subscribe_err(|_| {}, |e| error = Some(e));

    assert_eq!(error, Some(Fault::new("bad")));
    assert!(subscription.is_closed());
  }

  #[rxflux_macro::test]
  fn failed_without_handler_is_returned_every_time() {
    let flux = Flux::<i32>::failed(Fault::illegal_state());
    assert_eq!(flux.subscribe(|_| {}).unwrap_err(), Fault::illegal_state());
    assert_eq!(flux.subscribe(|_| {}).unwrap_err(), Fault::illegal_state());
  }
}
