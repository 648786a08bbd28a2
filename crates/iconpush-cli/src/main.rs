use iconpush_core::logging;

mod cli;

use crate::cli::{input_hint, Cli};

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch. Exit 1 unless every requested icon was uploaded.
    match Cli::run_from_args() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("iconpush error: {:#}", err);
            if let Some(hint) = input_hint(&err) {
                eprintln!("{}", hint);
            }
            std::process::exit(1);
        }
    }
}
