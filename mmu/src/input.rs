//! Workload file parsing (§6.2): `#`-commented lines, a process count, then
//! per-process VMA declarations, then the instruction stream.
use std::io::BufRead;

use crate::error::{MmuError, Result};
use crate::memory::{Process, Vma};
use crate::simulation::{Instruction, Op};

fn next_meaningful_line(lines: &mut impl Iterator<Item = (usize, String)>) -> Option<(usize, String)> {
    for (no, line) in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        return Some((no, trimmed.to_string()));
    }
    None
}

pub struct Workload {
    pub processes: Vec<Process>,
    pub instructions: Vec<Instruction>,
}

pub fn load(reader: impl BufRead) -> Result<Workload> {
    let raw: Vec<(usize, String)> = reader
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.unwrap_or_default()))
        .collect();
    let mut iter = raw.into_iter();

    let malformed = |no: usize, line: &str| MmuError::MalformedInput {
        line_no: no,
        line: line.to_string(),
    };

    let (no, line) = next_meaningful_line(&mut iter).ok_or(MmuError::MissingArgument("process count"))?;
    let num_procs: usize = line.parse().map_err(|_| malformed(no, &line))?;

    let mut processes = Vec::with_capacity(num_procs);
    for pid in 0..num_procs {
        let (no, line) = next_meaningful_line(&mut iter).ok_or_else(|| malformed(0, ""))?;
        let num_vmas: usize = line.parse().map_err(|_| malformed(no, &line))?;
        let mut vmas = Vec::with_capacity(num_vmas);
        for _ in 0..num_vmas {
            let (no, line) = next_meaningful_line(&mut iter).ok_or_else(|| malformed(0, ""))?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(malformed(no, &line));
            }
            let parse_usize = |s: &str| s.parse::<usize>().map_err(|_| malformed(no, &line));
            let parse_flag = |s: &str| s.parse::<u8>().map(|v| v != 0).map_err(|_| malformed(no, &line));
            vmas.push(Vma {
                start_vpage: parse_usize(fields[0])?,
                end_vpage: parse_usize(fields[1])?,
                write_protect: parse_flag(fields[2])?,
                file_mapped: parse_flag(fields[3])?,
            });
        }
        processes.push(Process::new(pid as u32, vmas));
    }

    let mut instructions = Vec::new();
    while let Some((no, line)) = next_meaningful_line(&mut iter) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(malformed(no, &line));
        }
        let operand: u32 = fields[1].parse().map_err(|_| malformed(no, &line))?;
        let op = match fields[0] {
            "c" => Op::Switch,
            "r" => Op::Read,
            "w" => Op::Write,
            "e" => Op::Exit,
            _ => return Err(malformed(no, &line)),
        };
        instructions.push(Instruction { op, operand });
    }

    Ok(Workload {
        processes,
        instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_single_process_workload() {
        let data = "# comment\n1\n1\n0 1 0 0\nc 0\nr 0\nw 1\ne 0\n";
        let wl = load(Cursor::new(data)).unwrap();
        assert_eq!(wl.processes.len(), 1);
        assert_eq!(wl.processes[0].vmas.len(), 1);
        assert_eq!(wl.instructions.len(), 4);
    }
}
