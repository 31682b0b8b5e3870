use {
  common::{
    apply,
    flaky::{Failure, FlakyStore},
  },
  simplewallet_vm::{
    Fault,
    InMemoryStateStore,
    Ledger,
    Outcome,
    State,
    StoreError,
    StoreLedger,
    TransactionHandler,
  },
};

mod common;

fn flaky_ledger() -> (TransactionHandler, StoreLedger<FlakyStore>) {
  let handler = TransactionHandler::default();
  let store = FlakyStore::new(InMemoryStateStore::scoped(handler.namespaces()));
  (handler, StoreLedger::new(store))
}

fn set_failure(ledger: StoreLedger<FlakyStore>, failure: Failure) -> StoreLedger<FlakyStore> {
  let mut store = ledger.into_inner();
  store.failure = failure;
  StoreLedger::new(store)
}

#[test]
fn unreachable_store_faults() {
  let (handler, ledger) = flaky_ledger();
  let mut ledger = set_failure(ledger, Failure::Unreachable);

  assert_eq!(
    apply(&handler, &mut ledger, "alice", "deposit,10"),
    Outcome::Faulted(Fault::Store(StoreError::Unavailable(
      "connection reset".into()
    )))
  );
}

#[test]
fn failed_write_faults() {
  let (handler, ledger) = flaky_ledger();
  let mut ledger = set_failure(ledger, Failure::ReadOnly);

  assert!(apply(&handler, &mut ledger, "alice", "deposit,10").is_faulted());
}

#[test]
fn dropped_transfer_leg_is_detected() {
  let (handler, mut ledger) = flaky_ledger();
  assert!(apply(&handler, &mut ledger, "alice", "deposit,10").is_applied());

  let mut ledger = set_failure(ledger, Failure::DropLastWrite);
  let outcome = apply(&handler, &mut ledger, "alice", "transfer,4,bob");

  let alice = handler.codec().derive("alice");
  let bob = handler.codec().derive("bob");
  let dropped = alice.max(bob);

  assert_eq!(
    outcome,
    Outcome::Faulted(Fault::PartialWrite {
      requested: 2,
      written: 1,
      missing: vec![dropped],
    })
  );
}

#[test]
fn format_errors_never_touch_the_store() {
  let (handler, ledger) = flaky_ledger();
  let mut ledger = set_failure(ledger, Failure::Unreachable);

  assert!(apply(&handler, &mut ledger, "alice", "withdraw,5").is_faulted());
  assert!(apply(&handler, &mut ledger, "alice", "withdraw,five").is_rejected());
}

#[test]
fn corrupt_balance_faults() -> anyhow::Result<()> {
  let handler = TransactionHandler::default();
  let alice = handler.codec().derive("alice");

  let mut store = InMemoryStateStore::default();
  store.set([(alice, b"12abc".to_vec())].into_iter().collect())?;
  let mut ledger = StoreLedger::new(store);

  let outcome = apply(&handler, &mut ledger, "alice", "deposit,1");
  assert!(matches!(
    outcome,
    Outcome::Faulted(Fault::CorruptState { address, .. }) if address == alice
  ));

  assert!(handler.balance(&ledger, "alice").is_err());
  Ok(())
}

#[test]
fn foreign_namespace_store_faults_on_write() {
  let handler = TransactionHandler::default();
  let other = TransactionHandler::new(simplewallet_primitives::Family::new(
    "other",
    vec!["1.0".into()],
  ));

  // a store that only admits the other family's keys
  let mut ledger = StoreLedger::new(InMemoryStateStore::scoped(other.namespaces()));
  assert!(apply(&handler, &mut ledger, "alice", "deposit,1").is_faulted());
  assert_eq!(
    ledger.read_balance(&handler.codec().derive("alice")),
    Ok(0)
  );
}
