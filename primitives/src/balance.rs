use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Stored balance is not valid UTF-8")]
  NotUtf8,

  #[error("Stored balance '{0}' is not a non-negative decimal integer")]
  NotAnInteger(String),
}

/// Balances live in state as the decimal ASCII string of their value.
pub fn encode(balance: u64) -> Vec<u8> {
  balance.to_string().into_bytes()
}

pub fn decode(bytes: &[u8]) -> Result<u64, Error> {
  let text = std::str::from_utf8(bytes).map_err(|_| Error::NotUtf8)?;
  parse_digits(text).ok_or_else(|| Error::NotAnInteger(text.to_owned()))
}

/// Parses a string made of ASCII digits only into a u64.
///
/// Unlike `str::parse`, a leading `+` is refused, so every
/// accepted value has exactly one textual form up to leading zeros.
pub(crate) fn parse_digits(text: &str) -> Option<u64> {
  if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  text.parse().ok()
}
