use {
  crate::{Fault, StateDiff},
  simplewallet_primitives::FormatError,
  thiserror::Error,
};

/// Reasons an operation is refused as invalid.
///
/// A rejected operation never mutates state, and replaying it against
/// the same prior state rejects it again for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
  #[error("Malformed transaction: {0}")]
  Format(#[from] FormatError),

  #[error("Amount must be greater than zero")]
  NonPositiveAmount,

  #[error("Insufficient funds: amount {amount} exceeds balance {balance}")]
  InsufficientFunds { balance: u64, amount: u64 },

  #[error("Crediting {amount} to balance {balance} overflows")]
  BalanceOverflow { balance: u64, amount: u64 },
}

/// The result of applying one operation, as reported to the framework
/// hosting the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// The operation was valid and these balances were written.
  Applied(StateDiff),

  /// The operation is invalid. Nothing was written.
  Rejected(Rejection),

  /// The store misbehaved. The operation may or may not be valid.
  Faulted(Fault),
}

impl Outcome {
  pub fn is_applied(&self) -> bool {
    matches!(self, Outcome::Applied(_))
  }

  pub fn is_rejected(&self) -> bool {
    matches!(self, Outcome::Rejected(_))
  }

  pub fn is_faulted(&self) -> bool {
    matches!(self, Outcome::Faulted(_))
  }
}

/// Either way an operation can fail, so that apply can use `?`.
#[derive(Debug, Error)]
pub(crate) enum Error {
  #[error(transparent)]
  Rejected(#[from] Rejection),

  #[error(transparent)]
  Faulted(#[from] Fault),
}

impl From<FormatError> for Error {
  fn from(e: FormatError) -> Self {
    Error::Rejected(e.into())
  }
}

impl Outcome {
  pub(crate) fn from_result(result: Result<StateDiff, Error>) -> Self {
    match result {
      Ok(diff) => Outcome::Applied(diff),
      Err(Error::Rejected(r)) => Outcome::Rejected(r),
      Err(Error::Faulted(f)) => Outcome::Faulted(f),
    }
  }
}
