//! `linker <input>` — see §6.4.
use std::process::ExitCode;

use clap::Parser;
use linker::{Linker, LinkerError};

#[derive(Parser)]
#[command(name = "linker", about = "Two-pass relocating linker coursework simulator")]
struct Cli {
    /// Path to the module source file
    input: String,
}

fn run(cli: &Cli) -> linker::Result<String> {
    let content = std::fs::read_to_string(&cli.input).map_err(|source| LinkerError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let linker = Linker::new(content);
    let mut out = String::new();
    linker
        .run(&mut out)
        .expect("writing to an in-memory String never fails");
    Ok(out)
}

fn main() -> ExitCode {
    sim_common::logging::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
