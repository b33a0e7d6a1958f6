use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::Parser;
use sim_common::RandomStream;

use mmu::error::{MmuError, Result};
use mmu::input::load;
use mmu::pager::{Aging, Clock, Fifo, Nru, Pager, Random, WorkingSet};
use mmu::report::{write_cost_summary, write_frame_table, write_instruction_trace, write_page_tables};
use mmu::simulation::Simulation;

/// Virtual memory MMU coursework simulator.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of physical frames (<= 128).
    #[arg(short = 'f', default_value_t = 16)]
    frames: usize,

    /// Pager algorithm: f|c|a|e|w|r
    #[arg(short = 'a', default_value = "f")]
    algo: char,

    /// Trace flags: any of {O,P,F,S,a,f,x,y}
    #[arg(short = 'o', default_value = "")]
    flags: String,

    input: String,
    rfile: String,
}

fn build_pager(algo: char) -> Result<Box<dyn Pager>> {
    match algo {
        'f' => Ok(Box::new(Fifo::new())),
        'c' => Ok(Box::new(Clock::new())),
        'e' => Ok(Box::new(Nru::new())),
        'a' => Ok(Box::new(Aging::new())),
        'w' => Ok(Box::new(WorkingSet::new())),
        'r' => Ok(Box::new(Random::new())),
        other => Err(MmuError::UnknownAlgorithm(other)),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let mut pager = build_pager(cli.algo)?;
    let mut rng = RandomStream::load(&cli.rfile)?;

    let input_file = File::open(&cli.input).map_err(|source| MmuError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let workload = load(BufReader::new(input_file))?;

    let record_trace = cli.flags.contains('O');
    let mut sim = Simulation::new(
        pager.as_mut(),
        &mut rng,
        cli.frames,
        workload.processes,
        record_trace,
    );
    sim.run(&workload.instructions);

    let mut out = String::new();
    if record_trace {
        write_instruction_trace(&mut out, &sim.trace).expect("String write is infallible");
    }
    if cli.flags.contains('P') {
        write_page_tables(&mut out, sim.processes()).expect("String write is infallible");
    }
    if cli.flags.contains('F') {
        write_frame_table(&mut out, sim.frames()).expect("String write is infallible");
    }
    if cli.flags.contains('S') {
        write_cost_summary(&mut out, sim.processes(), sim.total_cost())
            .expect("String write is infallible");
    }
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
