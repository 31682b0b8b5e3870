use simplewallet_primitives::{Address, AddressCodec, Operation};

/// An operation bound to the state addresses it reads and writes.
///
/// The initiator of the transaction is the account credited by a
/// deposit, debited by a withdraw and the source of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
  Deposit {
    account: Address,
    amount: u64,
  },
  Withdraw {
    account: Address,
    amount: u64,
  },
  Transfer {
    source: Address,
    target: Address,
    amount: u64,
  },
}

impl Transition {
  pub fn resolve(
    codec: &AddressCodec,
    initiator: &str,
    operation: &Operation,
  ) -> Self {
    let initiator = codec.derive(initiator);
    match operation {
      Operation::Deposit { amount } => Transition::Deposit {
        account: initiator,
        amount: *amount,
      },
      Operation::Withdraw { amount } => Transition::Withdraw {
        account: initiator,
        amount: *amount,
      },
      Operation::Transfer { amount, target } => Transition::Transfer {
        source: initiator,
        target: codec.derive(target),
        amount: *amount,
      },
    }
  }

  pub fn amount(&self) -> u64 {
    match self {
      Transition::Deposit { amount, .. }
      | Transition::Withdraw { amount, .. }
      | Transition::Transfer { amount, .. } => *amount,
    }
  }

  /// Every address this transition writes, in the order of writes.
  /// All of them are read before anything is written.
  pub fn addresses(&self) -> Vec<Address> {
    match self {
      Transition::Deposit { account, .. }
      | Transition::Withdraw { account, .. } => vec![*account],
      Transition::Transfer { source, target, .. } => vec![*source, *target],
    }
  }
}
