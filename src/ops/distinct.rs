use std::{collections::HashSet, hash::Hash};

use crate::{flux::Flux, observer::Emitter};

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Forwards a value only the first time it is seen by a subscription.
  pub fn distinct(self) -> Self
  where
    Item: Eq + Hash + Clone,
  {
    Self::new(move |emitter| {
      self.run(&mut DistinctRelay { downstream: emitter, seen: HashSet::new() });
      Ok(())
    })
  }
}

struct DistinctRelay<'a, D: ?Sized, Item> {
  downstream: &'a mut D,
  seen: HashSet<Item>,
}

impl<Item, Err, D> Emitter<Item, Err> for DistinctRelay<'_, D, Item>
where
  D: Emitter<Item, Err> + ?Sized,
  Item: Eq + Hash + Clone,
{
  fn next(&mut self, value: Item) {
    if self.seen.insert(value.clone()) {
      self.downstream.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) { self.downstream.error(err) }

  #[inline]
  fn complete(&mut self) { self.downstream.complete() }

  #[inline]
  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}
