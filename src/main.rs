//! qt-transifex - push, pull and compile Qt plugin translations with Transifex.

use qt_transifex::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => cli::report_error(&e),
    };

    process::exit(exit_code);
}
