use {
  simplewallet_primitives::Address,
  simplewallet_vm::{InMemoryStateStore, State, StoreError},
  std::collections::{BTreeMap, BTreeSet},
};

/// How a [`FlakyStore`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
  /// Behaves like a healthy store.
  None,

  /// Every read and write errors out.
  Unreachable,

  /// Writes succeed except for the last address of each batch,
  /// which is silently dropped.
  DropLastWrite,

  /// Writes error out, reads still work.
  ReadOnly,
}

/// Store double wrapping an in-memory store with injected failures.
#[derive(Debug)]
pub struct FlakyStore {
  pub inner: InMemoryStateStore,
  pub failure: Failure,
}

impl FlakyStore {
  pub fn new(inner: InMemoryStateStore) -> Self {
    Self {
      inner,
      failure: Failure::None,
    }
  }
}

impl State for FlakyStore {
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError> {
    match self.failure {
      Failure::Unreachable => Err(StoreError::Unavailable("connection reset".into())),
      _ => self.inner.get(addresses),
    }
  }

  fn set(
    &mut self,
    mut entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError> {
    match self.failure {
      Failure::None => self.inner.set(entries),
      Failure::Unreachable => Err(StoreError::Unavailable("connection reset".into())),
      Failure::ReadOnly => Err(StoreError::Backend("read-only".into())),
      Failure::DropLastWrite => {
        if let Some(last) = entries.keys().next_back().copied() {
          entries.remove(&last);
        }
        self.inner.set(entries)
      }
    }
  }
}
