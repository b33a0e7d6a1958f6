//! Final report formatting (§6.1): one zero-padded-pid summary line per
//! process, followed by an aggregate `SUM` line.
use std::fmt::Write;

use crate::process::ProcessRef;

pub fn write_report(
    out: &mut dyn Write,
    scheduler_label: &str,
    processes: &[ProcessRef],
    finish_time: i64,
    total_io_time: i64,
) -> std::fmt::Result {
    writeln!(out, "{}", scheduler_label)?;
    for p in processes {
        let p = p.borrow();
        writeln!(
            out,
            "{:04}: {:5} {:5} {:5} {:5} {:5} | {:5} {:5} {:5} {:5}",
            p.pid,
            p.arrival_time,
            p.total_cpu,
            p.max_cpu_burst,
            p.max_io_burst,
            p.static_prio,
            p.finish_time,
            p.turnaround(),
            p.io_time,
            p.wait_time,
        )?;
    }

    let n = processes.len().max(1) as f64;
    let total_turnaround: i64 = processes.iter().map(|p| p.borrow().turnaround()).sum();
    let total_cpu: i64 = processes.iter().map(|p| p.borrow().total_cpu).sum();
    let total_wait: i64 = processes.iter().map(|p| p.borrow().wait_time).sum();

    let cpu_util = if finish_time > 0 {
        100.0 * total_cpu as f64 / finish_time as f64
    } else {
        0.0
    };
    let io_util = if finish_time > 0 {
        100.0 * total_io_time as f64 / finish_time as f64
    } else {
        0.0
    };
    let throughput = 100.0 * processes.len() as f64 / finish_time.max(1) as f64;

    writeln!(
        out,
        "SUM: {} {:.2} {:.2} {:.2} {:.3} {:.3}",
        finish_time,
        cpu_util,
        io_util,
        total_turnaround as f64 / n,
        total_wait as f64 / n,
        throughput,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::new_ref;

    #[test]
    fn report_includes_header_and_sum() {
        let p = new_ref(0, 0, 10, 10, 10, 2);
        p.borrow_mut().finish_time = 20;
        p.borrow_mut().wait_time = 5;
        let mut out = String::new();
        write_report(&mut out, "FCFS", &[p], 20, 3).unwrap();
        assert!(out.starts_with("FCFS\n"));
        assert!(out.contains("SUM:"));
    }
}
