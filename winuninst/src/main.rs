use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use winuninst_core::{Outcome, Prompter, RegistryKey, Session, SystemExecutor};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "winuninst_core=trace").
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Show the uninstall command without running it.
    #[arg(long, default_value = "false")]
    dry_run: bool,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stdout carries the prompts; diagnostics go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(windows)]
fn local_machine() -> anyhow::Result<impl RegistryKey> {
    Ok(winuninst_core::registry::windows::local_machine())
}

#[cfg(not(windows))]
fn local_machine() -> anyhow::Result<impl RegistryKey> {
    Err::<winuninst_core::MemoryKey, _>(winuninst_core::Error::UnsupportedPlatform.into())
}

fn run(args: &Args) -> anyhow::Result<Outcome> {
    let hklm = local_machine()?;
    let executor = SystemExecutor;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    Session::new(&hklm, &executor)
        .dry_run(args.dry_run)
        .run(&mut prompter)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(outcome) => {
            tracing::debug!(?outcome, "session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
