use {
  crate::balance::parse_digits,
  std::{fmt::Display, str::FromStr},
  thiserror::Error,
};

/// Reasons a payload is refused before it reaches the validator.
///
/// All of these end up as a rejected transaction, never as an
/// internal fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
  #[error("Payload is not valid UTF-8")]
  InvalidEncoding,

  #[error("Payload must have at least 1 comma")]
  TooFewFields,

  #[error("Payload must have at most 2 commas")]
  TooManyFields,

  #[error("Unknown operation '{0}', expected deposit, withdraw or transfer")]
  UnknownOperation(String),

  #[error("Amount '{0}' is not a non-negative integer")]
  InvalidAmount(String),

  #[error("Transfer requires a non-empty target account")]
  MissingTarget,

  #[error("Operation {0} does not take a target account")]
  UnexpectedField(OperationKind),

  #[error("Transaction has no initiator identity")]
  MissingInitiator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
  Deposit,
  Withdraw,
  Transfer,
}

impl FromStr for OperationKind {
  type Err = FormatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "deposit" => Ok(OperationKind::Deposit),
      "withdraw" => Ok(OperationKind::Withdraw),
      "transfer" => Ok(OperationKind::Transfer),
      other => Err(FormatError::UnknownOperation(other.to_owned())),
    }
  }
}

impl Display for OperationKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", match self {
      OperationKind::Deposit => "deposit",
      OperationKind::Withdraw => "withdraw",
      OperationKind::Transfer => "transfer",
    })
  }
}

/// One ledger instruction decoded from a transaction payload.
///
/// The wire form is `operation,amount[,target]`. The account that is
/// debited or credited by deposit and withdraw, and the source of a
/// transfer, is never part of the payload; it is the authenticated
/// initiator of the transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
  Deposit { amount: u64 },
  Withdraw { amount: u64 },
  Transfer { amount: u64, target: String },
}

impl Operation {
  pub fn parse(payload: &[u8]) -> Result<Self, FormatError> {
    let payload =
      std::str::from_utf8(payload).map_err(|_| FormatError::InvalidEncoding)?;

    let fields: Vec<&str> = payload.split(',').collect();
    if fields.len() < 2 {
      return Err(FormatError::TooFewFields);
    }
    if fields.len() > 3 {
      return Err(FormatError::TooManyFields);
    }

    let kind: OperationKind = fields[0].parse()?;
    let amount = parse_digits(fields[1])
      .ok_or_else(|| FormatError::InvalidAmount(fields[1].to_owned()))?;
    let target = fields.get(2).copied();

    match (kind, target) {
      (OperationKind::Deposit, None) => Ok(Operation::Deposit { amount }),
      (OperationKind::Withdraw, None) => Ok(Operation::Withdraw { amount }),
      (OperationKind::Transfer, Some(target)) if !target.is_empty() => {
        Ok(Operation::Transfer {
          amount,
          target: target.to_owned(),
        })
      }
      (OperationKind::Transfer, _) => Err(FormatError::MissingTarget),
      (kind, Some(_)) => Err(FormatError::UnexpectedField(kind)),
    }
  }

  pub fn kind(&self) -> OperationKind {
    match self {
      Operation::Deposit { .. } => OperationKind::Deposit,
      Operation::Withdraw { .. } => OperationKind::Withdraw,
      Operation::Transfer { .. } => OperationKind::Transfer,
    }
  }

  pub fn amount(&self) -> u64 {
    match self {
      Operation::Deposit { amount }
      | Operation::Withdraw { amount }
      | Operation::Transfer { amount, .. } => *amount,
    }
  }
}
