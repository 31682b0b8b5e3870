use crate::{Rejection, Snapshot, Transition};

/// Checks all preconditions of a transition against the balances
/// observed before any write.
///
/// A deposit has no state precondition, a first deposit establishes
/// the account. A withdraw and a transfer need the debited account to
/// hold at least the amount. The credited side of a transfer need not
/// exist yet.
pub fn validate(
  transition: &Transition,
  snapshot: &Snapshot,
) -> Result<(), Rejection> {
  let amount = transition.amount();
  if amount == 0 {
    return Err(Rejection::NonPositiveAmount);
  }

  match transition {
    Transition::Deposit { account, .. } => {
      ensure_credit(snapshot.balance(account), amount)
    }
    Transition::Withdraw { account, .. } => {
      ensure_funds(snapshot.balance(account), amount)
    }
    Transition::Transfer { source, target, .. } => {
      ensure_funds(snapshot.balance(source), amount)?;
      if source == target {
        // debit and credit of the same account net out
        Ok(())
      } else {
        ensure_credit(snapshot.balance(target), amount)
      }
    }
  }
}

fn ensure_funds(balance: u64, amount: u64) -> Result<(), Rejection> {
  if balance < amount {
    return Err(Rejection::InsufficientFunds { balance, amount });
  }
  Ok(())
}

fn ensure_credit(balance: u64, amount: u64) -> Result<(), Rejection> {
  match balance.checked_add(amount) {
    Some(_) => Ok(()),
    None => Err(Rejection::BalanceOverflow { balance, amount }),
  }
}
