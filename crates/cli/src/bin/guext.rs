use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    guext_cli::main_entry()
}
