use {
  crate::settings::{Command, SystemSettings},
  clap::Parser,
  simplewallet_vm::{StoreLedger, TransactionHandler},
  std::{
    fs::File,
    io::{self, BufReader},
  },
  tracing::{info, subscriber::set_global_default},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod replay;
mod settings;
mod storage;

fn main() -> anyhow::Result<()> {
  let settings = SystemSettings::parse();

  // configure logging, RUST_LOG wins over -v
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(settings.log_level()));
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .finish(),
  )?;

  info!("Starting simplewallet devnode");
  info!("Settings: {settings:?}");

  let handler = TransactionHandler::new(settings.family());
  let mut ledger = StoreLedger::new(settings.storage()?);

  match &settings.command {
    Command::Replay { input } => {
      let stdout = io::stdout().lock();
      let summary = match input {
        Some(path) => replay::run(
          &handler,
          &mut ledger,
          BufReader::new(File::open(path)?),
          stdout,
        )?,
        None => replay::run(&handler, &mut ledger, io::stdin().lock(), stdout)?,
      };
      info!(
        "replay finished: {} applied, {} rejected, {} accounts written",
        summary.applied,
        summary.rejected,
        summary.written.len()
      );
    }
    Command::Balance { account } => {
      println!("{}", handler.balance(&ledger, account)?);
    }
    Command::Address { account } => {
      println!("{}", handler.codec().derive(account));
    }
    Command::Info => {
      println!("family:     {}", handler.family_name());
      println!("versions:   {}", handler.family_versions().join(", "));
      for namespace in handler.namespaces() {
        println!("namespace:  {namespace}");
      }
    }
  }

  Ok(())
}
