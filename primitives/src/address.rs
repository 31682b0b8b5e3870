use {
  crate::Family,
  multihash::{Hasher, Sha2_512},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

const NAMESPACE_LEN: usize = 3;
const ACCOUNT_LEN: usize = 32;
const ADDRESS_LEN: usize = NAMESPACE_LEN + ACCOUNT_LEN;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("Address must be {expected} hex characters long, got {0}", expected = ADDRESS_LEN * 2)]
  InvalidLength(usize),

  #[error("Invalid hex encoding: {0}")]
  InvalidHex(#[from] hex::FromHexError),
}

/// The three-byte prefix shared by all addresses of one transaction family.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace([u8; NAMESPACE_LEN]);

impl Namespace {
  pub(crate) fn from_digest(digest: &[u8]) -> Self {
    let mut bytes = [0u8; NAMESPACE_LEN];
    bytes.copy_from_slice(&digest[..NAMESPACE_LEN]);
    Self(bytes)
  }

  /// True if the address is keyed under this namespace.
  pub fn contains(&self, address: &Address) -> bool {
    address.namespace() == *self
  }
}

impl Display for Namespace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", hex::encode(self.0))
  }
}

impl Debug for Namespace {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "namespace({})", hex::encode(self.0))
  }
}

/// Represents the state store key under which an account balance is kept.
///
/// An address is a namespace prefix followed by the first 32 bytes of
/// the SHA-512 digest of the account's public identity. In its textual
/// form it is 70 lowercase hex characters, 6 for the namespace and 64
/// for the account part.
///
/// Addresses are a pure function of the family and the account identity,
/// so every node derives the same key for the same account.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
  pub fn namespace(&self) -> Namespace {
    Namespace::from_digest(&self.0)
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", hex::encode(self.0))
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", hex::encode(self.0))
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    hex::encode(addr.0)
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.len() != ADDRESS_LEN * 2 {
      return Err(Error::InvalidLength(s.len()));
    }
    let mut bytes = [0u8; ADDRESS_LEN];
    hex::decode_to_slice(s, &mut bytes)?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

/// Derives account addresses for one transaction family.
///
/// The namespace is computed once from the family at construction
/// and reused for every derivation.
#[derive(Debug, Clone)]
pub struct AddressCodec {
  namespace: Namespace,
}

impl AddressCodec {
  pub fn new(family: &Family) -> Self {
    Self {
      namespace: family.namespace(),
    }
  }

  pub fn namespace(&self) -> Namespace {
    self.namespace
  }

  /// The same account identity always yields the same address.
  pub fn derive(&self, account_id: &str) -> Address {
    let mut hasher = Sha2_512::default();
    hasher.update(account_id.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[..NAMESPACE_LEN].copy_from_slice(&self.namespace.0);
    bytes[NAMESPACE_LEN..].copy_from_slice(&digest[..ACCOUNT_LEN]);
    Address(bytes)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, proptest::prelude::*};

  #[test]
  fn derive_known_address() -> anyhow::Result<()> {
    let codec = AddressCodec::new(&Family::default());
    let addr = codec.derive("alice");

    assert_eq!(
      addr.to_string(),
      "7e2664408b27d3097eea5a46bf2ab6433a7234a33d5e49957b13ec7acc2ca08e1a13c7"
    );
    assert_eq!(addr.to_string().len(), 70);
    assert!(codec.namespace().contains(&addr));
    assert_eq!(addr, addr.to_string().parse()?);
    Ok(())
  }

  #[test]
  fn distinct_identities_distinct_addresses() {
    let codec = AddressCodec::new(&Family::default());
    assert_ne!(codec.derive("alice"), codec.derive("bob"));
    assert_ne!(codec.derive(""), codec.derive(" "));
  }

  #[test]
  fn family_scopes_addresses() {
    let wallet = AddressCodec::new(&Family::default());
    let other = AddressCodec::new(&Family::new("other", vec!["1.0".into()]));

    let a = wallet.derive("alice");
    let b = other.derive("alice");
    assert_ne!(a, b);
    assert_eq!(a[3..], b[3..]);
    assert!(!wallet.namespace().contains(&b));
  }

  #[test]
  fn parse_rejects_malformed() {
    assert_eq!(
      "7e2664".parse::<Address>(),
      Err(Error::InvalidLength(6))
    );
    assert_eq!(
      "zz".repeat(35).parse::<Address>(),
      Err(Error::InvalidHex(hex::FromHexError::InvalidHexCharacter {
        c: 'z',
        index: 0
      }))
    );
    assert_eq!(
      Address::try_from("7e26".repeat(17).as_str()),
      Err(Error::InvalidLength(68))
    );
  }

  proptest! {
    #[test]
    fn derivation_is_deterministic(id in ".*") {
      let codec = AddressCodec::new(&Family::default());
      let first = codec.derive(&id);
      let second = AddressCodec::new(&Family::default()).derive(&id);
      prop_assert_eq!(first, second);
      prop_assert!(codec.namespace().contains(&first));
    }
  }
}
