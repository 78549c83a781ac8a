use std::{collections::HashMap, hash::Hash, iter};

use super::reduce::FoldRelay;
use crate::flux::Flux;

impl<Item: 'static, Err: 'static> Flux<Item, Err> {
  /// Gathers every value into a `C` and emits it once the upstream
  /// completes. Each subscription starts from `C::default()`.
  ///
  /// ```
  /// use std::collections::BTreeSet;
  ///
  /// use rxflux::prelude::*;
  ///
  /// let mut set = BTreeSet::new();
  /// Flux::<i32>::from_values([3, 1, 3, 2])
  ///   .collect::<BTreeSet<_>>()
  ///   .subscribe(|v| set = v)
  ///   .unwrap();
  /// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
  /// ```
  pub fn collect<C>(self) -> Flux<C, Err>
  where
    C: Default + Extend<Item> + 'static,
  {
    Flux::<C, Err>::new(move |emitter| {
      let fold = |acc: Option<C>, v: Item| {
        acc.map(|mut acc| {
          acc.extend(iter::once(v));
          acc
        })
      };
      self.run(&mut FoldRelay::new(emitter, Some(C::default()), &fold));
      Ok(())
    })
  }

  /// Gathers every value into a `Vec`, in arrival order.
  #[inline]
  pub fn collect_list(self) -> Flux<Vec<Item>, Err> { self.collect() }

  /// Gathers every value into a map keyed by `key`. When two values share a
  /// key the later one wins.
  pub fn collect_map<K, F>(self, key: F) -> Flux<HashMap<K, Item>, Err>
  where
    K: Eq + Hash + 'static,
    F: Fn(&Item) -> K + Send + Sync + 'static,
  {
    Flux::<HashMap<K, Item>, Err>::new(move |emitter| {
      let fold = |acc: Option<HashMap<K, Item>>, v: Item| {
        acc.map(|mut acc| {
          acc.insert(key(&v), v);
          acc
        })
      };
      self.run(&mut FoldRelay::new(emitter, Some(HashMap::<K, Item>::new()), &fold));
      Ok(())
    })
  }
}
