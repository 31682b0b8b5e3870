mod execution;
mod handler;
mod ledger;
mod outcome;
mod state;
mod transition;
mod validation;

pub use {
  execution::execute,
  handler::{Request, TransactionHandler},
  ledger::{Fault, Ledger, Snapshot, StoreLedger},
  outcome::{Outcome, Rejection},
  state::{InMemoryStateStore, State, StateDiff, StoreError},
  transition::Transition,
  validation::validate,
};
