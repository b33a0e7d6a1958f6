use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::Parser;

use disk_sched::error::{IoSchedError, Result};
use disk_sched::report::write_report;
use disk_sched::scheduler::{CLook, FLook, Fifo, IoScheduler, Look, Sstf};
use disk_sched::simulation::{Simulation, Trace};
use disk_sched::workload::load_requests;

/// Disk head-movement coursework simulator.
#[derive(Parser, Debug)]
struct Cli {
    /// Scheduler algorithm: i|j|s|c|f (FIFO, SSTF, LOOK, C-LOOK, F-LOOK).
    #[arg(short = 's', default_value = "i")]
    algo: char,

    /// Verbose per-tick trace.
    #[arg(short = 'v')]
    verbose: bool,

    /// F-LOOK queue-swap trace.
    #[arg(short = 'f')]
    show_swaps: bool,

    /// Candidate-queue trace at each selection.
    #[arg(short = 'q')]
    show_queue: bool,

    input: String,
}

fn build_scheduler(algo: char) -> Result<Box<dyn IoScheduler>> {
    match algo {
        'i' => Ok(Box::new(Fifo::new())),
        'j' => Ok(Box::new(Sstf::new())),
        's' => Ok(Box::new(Look::new())),
        'c' => Ok(Box::new(CLook::new())),
        'f' => Ok(Box::new(FLook::new())),
        other => Err(IoSchedError::UnknownAlgorithm(other)),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let mut scheduler = build_scheduler(cli.algo)?;

    let input_file = File::open(&cli.input).map_err(|source| IoSchedError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let requests = load_requests(BufReader::new(input_file))?;

    let trace = Trace {
        verbose: cli.verbose,
        show_swaps: cli.show_swaps,
        show_queue: cli.show_queue,
    };
    let mut sim = Simulation::new(scheduler.as_mut(), requests, trace);
    sim.run();

    let total_time = sim.total_time();
    let tot_movement = sim.total_movement();
    let mut completed = sim.completed().to_vec();
    completed.sort_by_key(|r| r.id);

    let mut out = String::new();
    for line in sim.log_lines() {
        out.push_str(line);
        out.push('\n');
    }
    write_report(&mut out, &completed, total_time, tot_movement).expect("writing to an in-memory String never fails");
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
