//! Payroll console entry point.
//!
//! # Responsibility
//! - Load store/logging settings from the environment.
//! - Open the store once and hand stdin/stdout to the console loop.
//!
//! # Invariants
//! - Startup failures exit non-zero with a one-line message on stderr.
//! - Menu-level failures never end the process; see `console`.

mod console;

use console::Console;
use log::{error, info};
use payroll_core::{init_logging, LogSettings, Store, StoreConfig};
use std::io::{self, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(mut settings) = LogSettings::from_env() {
        settings.echo_warnings = true;
        if let Err(err) = init_logging(&settings) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("error: cannot open payroll store: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=cli_start module=cli status=ok version={}",
        payroll_core::core_version()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(store, stdin.lock(), BufWriter::new(stdout.lock()));
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
