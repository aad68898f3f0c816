//! aimg - compute render parameters for marketplace asset thumbnails

use std::process::ExitCode;

use assetimage::cli;

fn main() -> ExitCode {
    cli::run()
}
