use {
  crate::storage::OnDiskStateStore,
  clap::{ArgAction, Parser, Subcommand},
  simplewallet_primitives::{Family, DEFAULT_FAMILY_NAME, DEFAULT_FAMILY_VERSION},
  simplewallet_vm::{InMemoryStateStore, State},
  std::path::PathBuf,
};

/// Simple Wallet Local Devnode
///
/// Applies wallet transactions to a local state store without any
/// consensus or networking, for dev, CI and test scenarios.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Transaction family name, determines the state namespace
  #[clap(long, default_value = DEFAULT_FAMILY_NAME, value_name = "NAME")]
  family_name: String,

  /// Transaction family versions served by this node
  #[clap(long,
    value_name = "VERSION",
    default_values_t = vec![DEFAULT_FAMILY_VERSION.to_string()])]
  family_version: Vec<String>,

  /// Directory of the persistent state store.
  /// State is kept in memory and lost on exit when omitted.
  #[clap(long, short, env = "SIMPLEWALLET_DATA_DIR", value_name = "PATH")]
  data_dir: Option<PathBuf>,

  /// Increase logging verbosity (-v info, -vv debug)
  #[clap(short, long, action = ArgAction::Count)]
  verbose: u8,

  #[clap(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Apply transactions in order, one `<initiator> <payload>` per line
  Replay {
    /// Input file, stdin when omitted
    #[clap(value_name = "FILE")]
    input: Option<PathBuf>,
  },

  /// Print the balance of an account
  Balance {
    #[clap(value_name = "ACCOUNT")]
    account: String,
  },

  /// Print the state address of an account
  Address {
    #[clap(value_name = "ACCOUNT")]
    account: String,
  },

  /// Print family name, versions and namespaces
  Info,
}

impl SystemSettings {
  pub fn family(&self) -> Family {
    Family::new(self.family_name.clone(), self.family_version.clone())
  }

  /// Default log level when RUST_LOG is not set.
  pub fn log_level(&self) -> &'static str {
    match self.verbose {
      0 => "warn",
      1 => "info",
      _ => "debug",
    }
  }

  /// Opens the state store, on disk when a data directory is
  /// given and in memory otherwise. Either way it only admits
  /// writes under the family namespace.
  pub fn storage(&self) -> anyhow::Result<Box<dyn State>> {
    let namespace = self.family().namespace();
    Ok(match &self.data_dir {
      Some(path) => Box::new(OnDiskStateStore::open(path, namespace)?),
      None => Box::new(InMemoryStateStore::scoped([namespace])),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let settings = SystemSettings::parse_from(["simplewallet-devnode", "info"]);
    assert_eq!(settings.family(), Family::default());
    assert_eq!(settings.log_level(), "warn");
    assert!(settings.data_dir.is_none());
    assert!(matches!(settings.command, Command::Info));
  }

  #[test]
  fn verbosity_and_subcommand_args() {
    let settings = SystemSettings::parse_from([
      "simplewallet-devnode",
      "-vv",
      "--family-name",
      "mywallet",
      "balance",
      "alice",
    ]);
    assert_eq!(settings.log_level(), "debug");
    assert_eq!(settings.family().name, "mywallet");
    assert!(matches!(
      settings.command,
      Command::Balance { ref account } if account == "alice"
    ));
  }
}
