use {
  anyhow::bail,
  simplewallet_vm::{Ledger, Outcome, Request, StateDiff, TransactionHandler},
  std::io::{BufRead, Write},
  tracing::debug,
};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
  pub applied: usize,
  pub rejected: usize,

  /// Latest balance of every account written during the replay.
  pub written: StateDiff,
}

/// Parses one `<initiator> <payload>` line.
///
/// Blank lines and lines starting with `#` carry no record. A line
/// without a payload becomes a record with an empty payload, which the
/// handler rejects like any other malformed transaction.
fn parse_record(line: &str) -> Option<Request> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return None;
  }

  Some(match line.split_once(char::is_whitespace) {
    Some((initiator, payload)) => Request::new(initiator, payload.trim()),
    None => Request::new(line, Vec::new()),
  })
}

/// Applies every record of the input in order and writes one outcome
/// line per record.
///
/// Stops at the first faulted record: later records may depend on its
/// effects, and whether it was applied is unknown.
pub fn run(
  handler: &TransactionHandler,
  ledger: &mut impl Ledger,
  input: impl BufRead,
  mut output: impl Write,
) -> anyhow::Result<Summary> {
  let mut summary = Summary::default();

  for (index, line) in input.lines().enumerate() {
    let lineno = index + 1;
    let Some(request) = parse_record(&line?) else {
      continue;
    };

    debug!("record {lineno}: {request:?}");
    match handler.apply(&request, ledger) {
      Outcome::Applied(diff) => {
        summary.applied += 1;
        writeln!(output, "{lineno}: applied ({} writes)", diff.len())?;
        summary.written = std::mem::take(&mut summary.written).merge(diff);
      }
      Outcome::Rejected(reason) => {
        summary.rejected += 1;
        writeln!(output, "{lineno}: rejected: {reason}")?;
      }
      Outcome::Faulted(reason) => {
        writeln!(output, "{lineno}: faulted: {reason}")?;
        bail!("replay stopped at line {lineno}: {reason}");
      }
    }
  }

  Ok(summary)
}
