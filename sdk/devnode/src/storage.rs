use {
  simplewallet_primitives::{Address, Namespace},
  simplewallet_vm::{State, StoreError},
  std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
  },
  tracing::warn,
};

/// Persistent state store on top of sled.
///
/// Each namespace gets its own tree, keys are the textual form of
/// addresses. A batch of writes is applied atomically.
pub struct OnDiskStateStore {
  namespace: Namespace,
  tree: sled::Tree,
}

impl OnDiskStateStore {
  pub fn open(path: &Path, namespace: Namespace) -> Result<Self, sled::Error> {
    let db = sled::open(path)?;
    Ok(Self {
      namespace,
      tree: db.open_tree(namespace.to_string())?,
    })
  }
}

fn backend(e: sled::Error) -> StoreError {
  StoreError::Backend(e.to_string())
}

impl State for OnDiskStateStore {
  fn get(
    &self,
    addresses: &BTreeSet<Address>,
  ) -> Result<BTreeMap<Address, Vec<u8>>, StoreError> {
    let mut found = BTreeMap::new();
    for addr in addresses {
      if let Some(bytes) = self.tree.get(addr.to_string()).map_err(backend)? {
        found.insert(*addr, bytes.to_vec());
      }
    }
    Ok(found)
  }

  fn set(
    &mut self,
    entries: BTreeMap<Address, Vec<u8>>,
  ) -> Result<BTreeSet<Address>, StoreError> {
    if let Some(addr) = entries.keys().find(|a| !self.namespace.contains(a)) {
      warn!("refusing write outside of namespace {}: {addr}", self.namespace);
      return Ok(BTreeSet::new());
    }

    let mut batch = sled::Batch::default();
    for (addr, value) in &entries {
      batch.insert(addr.to_string().as_bytes(), value.as_slice());
    }
    self.tree.apply_batch(batch).map_err(backend)?;
    self.tree.flush().map_err(backend)?;

    Ok(entries.into_keys().collect())
  }
}
