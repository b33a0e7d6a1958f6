//! Workload file parsing (§4.3): one process per non-blank line,
//! `AT TC CB IO`, assigned pids in file order. Static priorities are drawn
//! from the random-number file, one draw per process, in the same order.
use std::io::BufRead;

use sim_common::RandomStream;

use crate::error::{Result, SchedError};
use crate::process::{new_ref, ProcessRef};

pub fn load_processes(
    reader: impl BufRead,
    rng: &mut RandomStream,
    maxprio: i32,
) -> Result<Vec<ProcessRef>> {
    let mut out = Vec::new();
    let mut pid = 0u32;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| SchedError::Io {
            path: "<workload>".to_string(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(SchedError::MalformedWorkloadLine {
                line_no: line_no + 1,
                line: line.clone(),
            });
        }
        let parse = |s: &str| -> Result<i64> {
            s.parse().map_err(|_| SchedError::MalformedWorkloadLine {
                line_no: line_no + 1,
                line: line.clone(),
            })
        };
        let at = parse(fields[0])?;
        let tc = parse(fields[1])?;
        let cb = parse(fields[2])?;
        let io = parse(fields[3])?;
        let static_prio = rng.next_one_indexed(maxprio as u32) as i32;

        out.push(new_ref(pid, at, tc, cb, io, static_prio));
        pid += 1;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_common::RandomStream;
    use std::io::Cursor;

    #[test]
    fn parses_four_field_lines_in_order() {
        let mut rng = RandomStream::from_values(vec![1, 2, 3]);
        let data = "0 10 5 5\n5 20 5 5\n";
        let procs = load_processes(Cursor::new(data), &mut rng, 4).unwrap();
        assert_eq!(procs.len(), 2);
        assert_eq!(procs[0].borrow().pid, 0);
        assert_eq!(procs[1].borrow().arrival_time, 5);
    }

    #[test]
    fn rejects_malformed_line() {
        let mut rng = RandomStream::from_values(vec![1]);
        let data = "0 10 5\n";
        let err = load_processes(Cursor::new(data), &mut rng, 4);
        assert!(err.is_err());
    }
}
