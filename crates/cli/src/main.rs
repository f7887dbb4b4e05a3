use std::process::ExitCode;

use clap::Parser;
use stockkeep_core::InventoryError;

mod cli;
mod commands;

fn main() -> ExitCode {
    stockkeep_observability::init();
    let cli = cli::Cli::parse();

    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<InventoryError>())
                .map_or("error", |e| e.kind().as_str());
            tracing::debug!(kind, error = ?err, "command failed");
            eprintln!("{kind}: {err:#}");
            ExitCode::FAILURE
        }
    }
}
