//! ColdTrace Ledger command shell.
//!
//! Runs a single ledger command against a directory-backed transport:
//!
//! ```bash
//! coldtrace-ledger --data /tmp/ledger init
//! coldtrace-ledger --data /tmp/ledger create PKG1 S1 I1 C1 P1 -5 5 meds
//! coldtrace-ledger --data /tmp/ledger accept PKG1 P1
//! coldtrace-ledger --data /tmp/ledger queryByRole Provider P1
//! ```
//!
//! Query output is printed as JSON on stdout; logs go to stderr and follow
//! `RUST_LOG`.

use std::process::ExitCode;

use clap::Parser;
use coldtrace_ledger_shell::{Command, Dispatcher, Response};
use coldtrace_ledger_state::DirTransport;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "coldtrace-ledger", about = "Cold-chain package tracking ledger", version)]
struct Cli {
    /// Data directory backing the ledger transport.
    #[arg(long, env = "COLDTRACE_DATA", default_value = "./coldtrace-data")]
    data: std::path::PathBuf,

    /// Command verb (init, create, accept, recordTemperature, deliver, query*).
    verb: String,

    /// Ordered string arguments for the verb.
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let transport = DirTransport::open(&cli.data)?;
    let command = Command::parse(&cli.verb, &cli.args)?;
    let response = Dispatcher::new(transport).dispatch(command)?;
    render(&response)
}

fn render(response: &Response) -> Result<(), Box<dyn std::error::Error>> {
    match response {
        Response::Ack => println!("ok"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}
