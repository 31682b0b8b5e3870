use {
  crate::address::Namespace,
  multihash::{Hasher, Sha2_512},
};

pub const DEFAULT_FAMILY_NAME: &str = "simplewallet";
pub const DEFAULT_FAMILY_VERSION: &str = "1.0";

/// Identifies the transaction family this ledger occupies within
/// the shared replicated state store.
///
/// All account addresses of a family live under a common namespace
/// prefix that is derived from the family name, so the store can
/// scope reads and writes of a handler to the family's own keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
  pub name: String,
  pub versions: Vec<String>,
}

impl Family {
  pub fn new(name: impl Into<String>, versions: Vec<String>) -> Self {
    Self {
      name: name.into(),
      versions,
    }
  }

  /// The first three bytes of SHA-512 over the family name.
  pub fn namespace(&self) -> Namespace {
    let mut hasher = Sha2_512::default();
    hasher.update(self.name.as_bytes());
    let digest = hasher.finalize();
    Namespace::from_digest(digest)
  }
}

impl Default for Family {
  fn default() -> Self {
    Self::new(DEFAULT_FAMILY_NAME, vec![DEFAULT_FAMILY_VERSION.into()])
  }
}
