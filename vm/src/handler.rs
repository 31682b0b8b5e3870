use {
  crate::{
    execute,
    outcome::Error,
    validate,
    Fault,
    Ledger,
    Outcome,
    StateDiff,
    Transition,
  },
  simplewallet_primitives::{
    AddressCodec,
    Family,
    FormatError,
    Namespace,
    Operation,
  },
  tracing::{debug, error, info, warn},
};

/// A transaction as handed over by the hosting framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
  /// Public identity of the authenticated signer of the transaction.
  /// It is bound by the framework, never taken from the payload.
  pub initiator: String,

  /// Raw `operation,amount[,target]` payload.
  pub payload: Vec<u8>,
}

impl Request {
  pub fn new(initiator: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
    Self {
      initiator: initiator.into(),
      payload: payload.into(),
    }
  }
}

/// Applies wallet operations of one transaction family to ledger state.
///
/// The handler holds no mutable state of its own. Given the same
/// request and the same prior ledger state it produces the same
/// outcome and the same writes on every node.
#[derive(Debug, Clone)]
pub struct TransactionHandler {
  family: Family,
  codec: AddressCodec,
}

impl TransactionHandler {
  pub fn new(family: Family) -> Self {
    let codec = AddressCodec::new(&family);
    Self { family, codec }
  }

  pub fn family_name(&self) -> &str {
    &self.family.name
  }

  pub fn family_versions(&self) -> &[String] {
    &self.family.versions
  }

  /// State namespaces this handler reads from and writes to.
  pub fn namespaces(&self) -> Vec<Namespace> {
    vec![self.codec.namespace()]
  }

  pub fn codec(&self) -> &AddressCodec {
    &self.codec
  }

  /// Parses, validates and executes one transaction.
  ///
  /// All balances touched by the operation are read in one snapshot,
  /// every precondition is checked against that snapshot, and only then
  /// are the new balances committed in one batch. A rejected operation
  /// leaves the ledger untouched. This method never retries.
  pub fn apply(&self, request: &Request, ledger: &mut impl Ledger) -> Outcome {
    let outcome = Outcome::from_result(self.try_apply(request, ledger));
    match &outcome {
      Outcome::Applied(diff) => {
        info!(
          initiator = %request.initiator,
          writes = diff.len(),
          "operation applied"
        );
      }
      Outcome::Rejected(reason) => {
        warn!(initiator = %request.initiator, "operation rejected: {reason}");
      }
      Outcome::Faulted(reason) => {
        error!(initiator = %request.initiator, "operation faulted: {reason}");
      }
    }
    outcome
  }

  /// Current balance of an account, zero if it was never written.
  pub fn balance(
    &self,
    ledger: &impl Ledger,
    account_id: &str,
  ) -> Result<u64, Fault> {
    ledger.read_balance(&self.codec.derive(account_id))
  }

  fn try_apply(
    &self,
    request: &Request,
    ledger: &mut impl Ledger,
  ) -> Result<StateDiff, Error> {
    if request.initiator.is_empty() {
      return Err(FormatError::MissingInitiator.into());
    }

    let operation = Operation::parse(&request.payload)?;
    debug!(kind = %operation.kind(), amount = operation.amount(), "parsed payload");

    let transition = Transition::resolve(&self.codec, &request.initiator, &operation);
    let snapshot = ledger.read_snapshot(&transition.addresses())?;
    debug!("observed: {snapshot:?}");

    validate(&transition, &snapshot)?;
    let diff = execute(&transition, &snapshot)?;
    ledger.commit(diff.clone())?;

    Ok(diff)
  }
}

impl Default for TransactionHandler {
  fn default() -> Self {
    Self::new(Family::default())
  }
}
