//! `legends` terminal binary.
//!
//! ```bash
//! LEGENDS_PARTY="warrior:Aria,sorcerer:Bram" LEGENDS_SEED=42 cargo run -p legends-client
//! ```

use std::process::ExitCode;

use legends_client::{ClientConfig, TerminalIo, logging, session};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    tracing::info!("Starting legends client");
    let mut io = TerminalIo::new();
    let outcome = session::run(&config, &mut io)?;
    tracing::info!(?outcome, "Client shutdown complete");
    Ok(())
}
