use std::process::ExitCode;

use clap::Parser;
use hooklens::cli::{Arguments, ExitStatus};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match hooklens::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Log to stderr: `warn` by default, `debug` with `-v`, `HOOKLENS_LOG` wins.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "hooklens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HOOKLENS_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
