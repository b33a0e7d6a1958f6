//! `-o` trace and summary formatting (§6.2).
use std::fmt::Write;

use crate::memory::{Frame, Process};
use crate::simulation::TraceEvent;

pub fn write_instruction_trace(out: &mut dyn Write, trace: &[TraceEvent]) -> std::fmt::Result {
    for ev in trace {
        match ev {
            TraceEvent::Instruction { op, operand } => writeln!(out, "{} {}", op, operand)?,
            TraceEvent::Unmap { pid, vpage, frame } => {
                writeln!(out, " UNMAP {}:{} {}", pid, vpage, frame)?
            }
            TraceEvent::Map { pid, vpage, frame } => writeln!(out, " MAP {}:{} {}", pid, vpage, frame)?,
            TraceEvent::In { pid, vpage } => writeln!(out, " IN {}:{}", pid, vpage)?,
            TraceEvent::Out { pid, vpage } => writeln!(out, " OUT {}:{}", pid, vpage)?,
            TraceEvent::FileIn { pid, vpage } => writeln!(out, " FIN {}:{}", pid, vpage)?,
            TraceEvent::FileOut { pid, vpage } => writeln!(out, " FOUT {}:{}", pid, vpage)?,
            TraceEvent::Zero { pid, vpage } => writeln!(out, " ZERO {}:{}", pid, vpage)?,
            TraceEvent::Segv => writeln!(out, " SEGV")?,
            TraceEvent::Segprot => writeln!(out, " SEGPROT")?,
        }
    }
    Ok(())
}

pub fn write_page_tables(out: &mut dyn Write, processes: &[Process]) -> std::fmt::Result {
    for p in processes {
        write!(out, "PT[{}]:", p.pid)?;
        for (vpage, pte) in p.page_table.iter().enumerate() {
            if pte.present {
                write!(
                    out,
                    " {}:{}{}{}{}",
                    vpage,
                    if pte.referenced { 'R' } else { '-' },
                    if pte.modified { 'M' } else { '-' },
                    if pte.paged_out { 'S' } else { '-' },
                    ""
                )?;
            } else if pte.paged_out {
                write!(out, " #")?;
            } else {
                write!(out, " *")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_frame_table(out: &mut dyn Write, frames: &[Frame]) -> std::fmt::Result {
    write!(out, "FT:")?;
    for f in frames {
        if f.mapped {
            write!(out, " {}:{}", f.pid, f.vpage)?;
        } else {
            write!(out, " *")?;
        }
    }
    writeln!(out)
}

pub fn write_cost_summary(
    out: &mut dyn Write,
    processes: &[Process],
    total_cost: u64,
) -> std::fmt::Result {
    for p in processes {
        let c = &p.cost;
        writeln!(
            out,
            "PROC[{}]: U={} M={} I={} F={} O={} FO={} Z={} SV={} SP={}",
            p.pid, c.unmaps, c.maps, c.ins, c.fins, c.outs, c.fouts, c.zeros, c.segv, c.segprot,
        )?;
    }
    writeln!(out, "TOTALCOST {}", total_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Vma;

    #[test]
    fn frame_table_marks_free_slots() {
        let frames = vec![Frame::default(); 2];
        let mut out = String::new();
        write_frame_table(&mut out, &frames).unwrap();
        assert_eq!(out.trim(), "FT: * *");
    }

    #[test]
    fn cost_summary_includes_totalcost() {
        let p = Process::new(
            0,
            vec![Vma {
                start_vpage: 0,
                end_vpage: 1,
                write_protect: false,
                file_mapped: false,
            }],
        );
        let mut out = String::new();
        write_cost_summary(&mut out, &[p], 42).unwrap();
        assert!(out.contains("TOTALCOST 42"));
    }
}
