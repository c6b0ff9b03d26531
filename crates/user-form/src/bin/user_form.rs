//! `user-form` entry point: validates create-user form documents.
//!
//! This binary delegates to `user_form::cli` for execution and rendering,
//! keeping the behaviour testable without spawning a process. The result
//! document goes to standard output; logs and failures go to standard error.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use user_form::FormSettings;
use user_form::cli::{CliArgs, CliError, EXIT_FAILURE, run};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let settings = match FormSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{}", CliError::from(err)) {
                drop(write_err);
            }
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    init_tracing(settings.log_json);

    ExitCode::from(run(
        &args.command,
        &settings,
        &mut io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    ))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
