//! Catalog CLI - Manage product categories and products from the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = catalog_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
