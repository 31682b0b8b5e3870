use {
  crate::{State, StateDiff, StoreError},
  simplewallet_primitives::{decode_balance, encode_balance, Address, BalanceError},
  std::collections::{BTreeMap, BTreeSet},
  thiserror::Error,
};

/// Infrastructure failures.
///
/// A fault says nothing about the validity of the operation that
/// triggered it; the surrounding framework may retry the whole unit of
/// work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
  #[error("State store error: {0}")]
  Store(#[from] StoreError),

  #[error("State store wrote {written} of {requested} addresses, missing {missing:?}")]
  PartialWrite {
    requested: usize,
    written: usize,
    missing: Vec<Address>,
  },

  #[error("Corrupt balance stored at {address}: {source}")]
  CorruptState {
    address: Address,
    source: BalanceError,
  },
}

/// Balances observed in one read, before any write of a transition.
///
/// Accounts that were never written are observed with balance zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
  balances: BTreeMap<Address, u64>,
}

impl Snapshot {
  /// Balance of an address as observed. Addresses outside of the read
  /// set have no observation and are reported as zero.
  pub fn balance(&self, address: &Address) -> u64 {
    self.balances.get(address).copied().unwrap_or(0)
  }
}

impl FromIterator<(Address, u64)> for Snapshot {
  fn from_iter<T: IntoIterator<Item = (Address, u64)>>(iter: T) -> Self {
    Self {
      balances: iter.into_iter().collect(),
    }
  }
}

/// Typed view of the account balances held in state.
pub trait Ledger {
  /// Reads the balances of all given addresses in one batch.
  fn read_snapshot(&self, addresses: &[Address]) -> Result<Snapshot, Fault>;

  /// Writes all balances of a statediff in one batch. Anything short of
  /// writing every address of the diff is a fault.
  fn commit(&mut self, diff: StateDiff) -> Result<(), Fault>;

  fn read_balance(&self, address: &Address) -> Result<u64, Fault> {
    Ok(self.read_snapshot(&[*address])?.balance(address))
  }

  fn write_balance(&mut self, address: Address, balance: u64) -> Result<(), Fault> {
    let mut diff = StateDiff::default();
    diff.set(address, balance);
    self.commit(diff)
  }
}

/// Ledger backed by a byte-level [`State`] store.
///
/// Balances are kept in state as decimal ASCII strings.
#[derive(Debug)]
pub struct StoreLedger<S: State> {
  store: S,
}

impl<S: State> StoreLedger<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn into_inner(self) -> S {
    self.store
  }
}

impl<S: State> Ledger for StoreLedger<S> {
  fn read_snapshot(&self, addresses: &[Address]) -> Result<Snapshot, Fault> {
    let request: BTreeSet<Address> = addresses.iter().copied().collect();
    let stored = self.store.get(&request)?;

    request
      .into_iter()
      .map(|address| match stored.get(&address) {
        Some(bytes) => decode_balance(bytes)
          .map(|balance| (address, balance))
          .map_err(|source| Fault::CorruptState { address, source }),
        None => Ok((address, 0)),
      })
      .collect()
  }

  fn commit(&mut self, diff: StateDiff) -> Result<(), Fault> {
    if diff.is_empty() {
      return Ok(());
    }

    let entries: BTreeMap<Address, Vec<u8>> = diff
      .iter()
      .map(|(addr, balance)| (*addr, encode_balance(balance)))
      .collect();

    let requested = entries.len();
    let expected: Vec<Address> = entries.keys().copied().collect();
    let written = self.store.set(entries)?;

    let missing: Vec<Address> = expected
      .into_iter()
      .filter(|addr| !written.contains(addr))
      .collect();

    if missing.is_empty() {
      Ok(())
    } else {
      Err(Fault::PartialWrite {
        requested,
        written: requested - missing.len(),
        missing,
      })
    }
  }
}
