//! Final report formatting (§6.3): one zero-indexed per-request line of
//! `arrive start end`, followed by an aggregate `SUM` line.
use std::fmt::Write;

use crate::request::Request;

pub fn write_report(out: &mut dyn Write, requests: &[Request], total_time: i64, tot_movement: i64) -> std::fmt::Result {
    let mut tot_turnaround: i64 = 0;
    let mut tot_waittime: i64 = 0;
    let mut max_waittime: i64 = 0;

    for (i, r) in requests.iter().enumerate() {
        let start = r.start_time.unwrap_or(r.arrive_time);
        let end = r.end_time.unwrap_or(start);
        writeln!(out, "{:5}: {:5} {:5} {:5}", i, r.arrive_time, start, end)?;
        tot_turnaround += end - r.arrive_time;
        let wait = start - r.arrive_time;
        tot_waittime += wait;
        max_waittime = max_waittime.max(wait);
    }

    let n = requests.len().max(1) as f64;
    writeln!(
        out,
        "SUM: {} {} {:.2} {:.2} {}",
        total_time,
        tot_movement,
        tot_turnaround as f64 / n,
        tot_waittime as f64 / n,
        max_waittime,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_includes_per_request_line_and_sum() {
        let mut r = Request::new(0, 0, 5);
        r.start_time = Some(0);
        r.end_time = Some(5);
        let mut out = String::new();
        write_report(&mut out, &[r], 5, 5).unwrap();
        assert!(out.contains("0:     0     0     5"));
        assert!(out.contains("SUM: 5 5"));
    }
}
