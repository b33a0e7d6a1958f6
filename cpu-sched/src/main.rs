use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use clap::Parser;
use sim_common::RandomStream;

use cpu_sched::error::{Result, SchedError};
use cpu_sched::report::write_report;
use cpu_sched::scheduler::{FifoLike, PriorityScheduler, RoundRobin, Scheduler, Srtf};
use cpu_sched::simulation::{Simulation, Trace};
use cpu_sched::workload::load_processes;

/// Discrete-event CPU scheduler coursework simulator.
#[derive(Parser, Debug)]
struct Cli {
    /// Scheduler spec: F | L | S | R<q> | P<q>[:<maxprio>] | E<q>[:<maxprio>]
    #[arg(short = 's', default_value = "F")]
    sched: String,

    /// Verbose per-event trace.
    #[arg(short = 'v')]
    verbose: bool,

    /// Show eligible-process set at each scheduling decision.
    #[arg(short = 'e')]
    show_eligible: bool,

    /// Show preemption details.
    #[arg(short = 't')]
    show_preempt: bool,

    input: String,
    rfile: String,
}

fn parse_sched_spec(spec: &str) -> Result<(Box<dyn Scheduler>, i32)> {
    let mut chars = spec.chars();
    let kind = chars.next().ok_or(SchedError::MissingArgument("sched"))?;
    let rest = chars.as_str();

    let split_quantum_maxprio = |rest: &str| -> Result<(i64, i32)> {
        let (q, mp) = match rest.split_once(':') {
            Some((q, mp)) => (q, Some(mp)),
            None => (rest, None),
        };
        let quantum: i64 = q.parse().map_err(|_| SchedError::InvalidSchedulerParam(rest.to_string()))?;
        let maxprio = match mp {
            Some(s) => s
                .parse()
                .map_err(|_| SchedError::InvalidSchedulerParam(rest.to_string()))?,
            None => 4,
        };
        Ok((quantum, maxprio))
    };

    match kind {
        'F' => Ok((Box::new(FifoLike::fcfs()), 4)),
        'L' => Ok((Box::new(FifoLike::lcfs()), 4)),
        'S' => Ok((Box::new(Srtf::new()), 4)),
        'R' => {
            let quantum: i64 = rest
                .parse()
                .map_err(|_| SchedError::InvalidSchedulerParam(rest.to_string()))?;
            Ok((Box::new(RoundRobin::new(quantum)), 4))
        }
        'P' => {
            let (quantum, maxprio) = split_quantum_maxprio(rest)?;
            Ok((Box::new(PriorityScheduler::new(quantum, maxprio, false)), maxprio))
        }
        'E' => {
            let (quantum, maxprio) = split_quantum_maxprio(rest)?;
            Ok((Box::new(PriorityScheduler::new(quantum, maxprio, true)), maxprio))
        }
        other => Err(SchedError::UnknownSchedulerType(other)),
    }
}

fn run(cli: &Cli) -> Result<String> {
    let (mut scheduler, maxprio) = parse_sched_spec(&cli.sched)?;
    let scheduler_label = scheduler.label();

    let mut rng = RandomStream::load(&cli.rfile)?;

    let input_file = File::open(&cli.input).map_err(|source| SchedError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let processes = load_processes(BufReader::new(input_file), &mut rng, maxprio)?;

    let trace = Trace {
        verbose: cli.verbose,
        show_eligible: cli.show_eligible,
        show_preempt: cli.show_preempt,
    };

    let mut sim = Simulation::new(scheduler.as_mut(), &mut rng, trace);
    for p in &processes {
        let at = p.borrow().arrival_time;
        sim.schedule_arrival(p.clone(), at);
    }
    sim.run();

    let finish_time = processes
        .iter()
        .map(|p| p.borrow().finish_time)
        .max()
        .unwrap_or(0);
    let total_io_time = sim.total_io_time();

    let mut out = String::new();
    for line in sim.log_lines() {
        out.push_str(line);
        out.push('\n');
    }
    write_report(&mut out, &scheduler_label, &processes, finish_time, total_io_time)
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
