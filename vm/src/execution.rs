use {
  crate::{Rejection, Snapshot, StateDiff, Transition},
  simplewallet_primitives::Address,
};

/// Computes the balances written by a transition.
///
/// Debits are applied before credits, and each step starts from the
/// balance left by the previous step when both touch the same account.
/// A transfer to oneself therefore debits and credits the same address
/// and ends at the balance it started with.
///
/// The returned statediff is meant to be committed as a single batch
/// to the ledger the snapshot was read from.
pub fn execute(
  transition: &Transition,
  snapshot: &Snapshot,
) -> Result<StateDiff, Rejection> {
  let mut diff = StateDiff::default();

  match transition {
    Transition::Deposit { account, amount } => {
      credit(&mut diff, snapshot, account, *amount)?;
    }
    Transition::Withdraw { account, amount } => {
      debit(&mut diff, snapshot, account, *amount)?;
    }
    Transition::Transfer {
      source,
      target,
      amount,
    } => {
      debit(&mut diff, snapshot, source, *amount)?;
      credit(&mut diff, snapshot, target, *amount)?;
    }
  }

  Ok(diff)
}

fn current(
  diff: &StateDiff,
  snapshot: &Snapshot,
  address: &Address,
) -> u64 {
  diff
    .get(address)
    .unwrap_or_else(|| snapshot.balance(address))
}

fn debit(
  diff: &mut StateDiff,
  snapshot: &Snapshot,
  address: &Address,
  amount: u64,
) -> Result<(), Rejection> {
  let balance = current(diff, snapshot, address);
  let updated = balance
    .checked_sub(amount)
    .ok_or(Rejection::InsufficientFunds { balance, amount })?;
  diff.set(*address, updated);
  Ok(())
}

fn credit(
  diff: &mut StateDiff,
  snapshot: &Snapshot,
  address: &Address,
  amount: u64,
) -> Result<(), Rejection> {
  let balance = current(diff, snapshot, address);
  let updated = balance
    .checked_add(amount)
    .ok_or(Rejection::BalanceOverflow { balance, amount })?;
  diff.set(*address, updated);
  Ok(())
}
