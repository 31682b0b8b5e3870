#![allow(dead_code)]

pub mod flaky;

use simplewallet_vm::{
  InMemoryStateStore,
  Ledger,
  Outcome,
  Request,
  StoreLedger,
  TransactionHandler,
};

pub type MemoryLedger = StoreLedger<InMemoryStateStore>;

/// A handler for the default family and an empty ledger.
pub fn empty_ledger() -> (TransactionHandler, MemoryLedger) {
  let handler = TransactionHandler::default();
  let ledger = StoreLedger::new(InMemoryStateStore::scoped(handler.namespaces()));
  (handler, ledger)
}

pub fn apply(
  handler: &TransactionHandler,
  ledger: &mut impl Ledger,
  initiator: &str,
  payload: &str,
) -> Outcome {
  handler.apply(&Request::new(initiator, payload), ledger)
}

pub fn balance(
  handler: &TransactionHandler,
  ledger: &impl Ledger,
  account: &str,
) -> u64 {
  handler
    .balance(ledger, account)
    .expect("in-memory reads never fault")
}

/// Raw contents of the store, used to assert that nothing was written.
pub fn dump(ledger: &MemoryLedger) -> Vec<(String, Vec<u8>)> {
  ledger
    .store()
    .iter()
    .map(|(addr, value)| (addr.to_string(), value.clone()))
    .collect()
}
