use {
  simplewallet_primitives::{Address, Namespace},
  std::collections::{BTreeMap, BTreeSet},
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("State store unavailable: {0}")]
  Unavailable(String),

  #[error("State store backend error: {0}")]
  Backend(String),
}

/// The replicated key-value state that balances are read from and
/// written to.
///
/// Implementations are provided by whatever hosts the handler, a
/// validator connection, an embedded database or plain memory. Reads
/// and writes are batched over a set of addresses.
pub trait State {
  /// Returns the values stored under the requested addresses.
  /// Addresses that were never written are absent from the result.
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError>;

  /// Stores all entries and returns the addresses actually written.
  fn set(
    &mut self,
    entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError>;
}

impl<S: State + ?Sized> State for &mut S {
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError> {
    (**self).get(addresses)
  }

  fn set(
    &mut self,
    entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError> {
    (**self).set(entries)
  }
}

impl<S: State + ?Sized> State for Box<S> {
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError> {
    (**self).get(addresses)
  }

  fn set(
    &mut self,
    entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError> {
    (**self).set(entries)
  }
}

/// Represents a change in account balances.
///
/// A state transition produces one statediff holding the new balance of
/// every account it touches. It is committed to the store as a single
/// batched write, so either all balances of a transition land or the
/// shortfall is reported.
///
/// Writing the same address twice keeps only the latest value, which is
/// what makes a transfer to oneself net out to the starting balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDiff {
  balances: BTreeMap<Address, u64>,
}

impl StateDiff {
  /// Sets the balance stored under a given address.
  ///
  /// If the state diff had a balance for this address
  /// then the old value is returned, otherwise `None` is returned.
  pub fn set(&mut self, address: Address, balance: u64) -> Option<u64> {
    self.balances.insert(address, balance)
  }

  pub fn get(&self, address: &Address) -> Option<u64> {
    self.balances.get(address).copied()
  }

  /// Merges a state diff with a newer diff.
  ///
  /// Applying the resulting diff is equivalent to
  /// applying the two merged diffs consecutively on
  /// any state store.
  pub fn merge(self, newer: StateDiff) -> StateDiff {
    let mut balances = self.balances;
    balances.extend(newer.balances);
    StateDiff { balances }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Address, u64)> {
    self.balances.iter().map(|(addr, balance)| (addr, *balance))
  }

  pub fn len(&self) -> usize {
    self.balances.len()
  }

  pub fn is_empty(&self) -> bool {
    self.balances.is_empty()
  }
}

/// Ephemeral state store, used by tests and by nodes started
/// without a data directory.
///
/// A store may be scoped to a set of namespaces. A batch that touches
/// any address outside of them is refused as a whole and nothing from
/// it is written.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
  data: BTreeMap<Address, Vec<u8>>,
  scope: Option<BTreeSet<Namespace>>,
}

impl InMemoryStateStore {
  pub fn scoped(namespaces: impl IntoIterator<Item = Namespace>) -> Self {
    Self {
      data: BTreeMap::new(),
      scope: Some(namespaces.into_iter().collect()),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Address, &Vec<u8>)> {
    self.data.iter()
  }

  fn in_scope(&self, address: &Address) -> bool {
    match &self.scope {
      Some(scope) => scope.contains(&address.namespace()),
      None => true,
    }
  }
}

impl State for InMemoryStateStore {
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError> {
    Ok(
      addresses
        .iter()
        .filter_map(|addr| self.data.get(addr).map(|v| (*addr, v.clone())))
        .collect(),
    )
  }

  fn set(
    &mut self,
    entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError> {
    if let Some(addr) = entries.keys().find(|addr| !self.in_scope(addr)) {
      tracing::warn!("refusing write outside of store namespaces: {addr}");
      return Ok(BTreeSet::new());
    }

    let written = entries.keys().copied().collect();
    self.data.extend(entries);
    Ok(written)
  }
}
