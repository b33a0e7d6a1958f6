//! Instruction loop and page-fault handling (§4.2).
use std::collections::VecDeque;

use sim_common::RandomStream;

use crate::memory::{cost, CostCounters, Frame, Process};
use crate::pager::Pager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Switch,
    Read,
    Write,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub op: Op,
    pub operand: u32,
}

#[derive(Debug, Clone)]
pub enum TraceEvent {
    Instruction { op: char, operand: u32 },
    Unmap { pid: u32, vpage: usize, frame: usize },
    Map { pid: u32, vpage: usize, frame: usize },
    In { pid: u32, vpage: usize },
    Out { pid: u32, vpage: usize },
    FileIn { pid: u32, vpage: usize },
    FileOut { pid: u32, vpage: usize },
    Zero { pid: u32, vpage: usize },
    Segv,
    Segprot,
}

pub struct Simulation<'a> {
    pub pager: &'a mut dyn Pager,
    pub rng: &'a mut RandomStream,
    frames: Vec<Frame>,
    free_frames: VecDeque<usize>,
    processes: Vec<Process>,
    current_pid: Option<usize>,
    instr_count: i64,
    total_cost: u64,
    pub trace: Vec<TraceEvent>,
    record_trace: bool,
}

impl<'a> Simulation<'a> {
    pub fn new(
        pager: &'a mut dyn Pager,
        rng: &'a mut RandomStream,
        num_frames: usize,
        processes: Vec<Process>,
        record_trace: bool,
    ) -> Self {
        Self {
            pager,
            rng,
            frames: vec![Frame::default(); num_frames],
            free_frames: (0..num_frames).collect(),
            processes,
            current_pid: None,
            instr_count: 0,
            total_cost: 0,
            trace: Vec::new(),
            record_trace,
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    fn proc_index(&self, pid: u32) -> usize {
        self.processes
            .iter()
            .position(|p| p.pid == pid)
            .expect("pid must refer to a declared process")
    }

    fn emit(&mut self, ev: TraceEvent) {
        if self.record_trace {
            self.trace.push(ev);
        }
    }

    pub fn run(&mut self, program: &[Instruction]) {
        for instr in program {
            self.instr_count += 1;
            match instr.op {
                Op::Switch => {
                    self.emit(TraceEvent::Instruction {
                        op: 'c',
                        operand: instr.operand,
                    });
                    self.current_pid = Some(self.proc_index(instr.operand));
                    self.total_cost += cost::SWITCHES;
                }
                Op::Read | Op::Write => {
                    self.emit(TraceEvent::Instruction {
                        op: if instr.op == Op::Read { 'r' } else { 'w' },
                        operand: instr.operand,
                    });
                    self.access(instr.operand as usize, instr.op == Op::Write);
                }
                Op::Exit => {
                    self.emit(TraceEvent::Instruction {
                        op: 'e',
                        operand: instr.operand,
                    });
                    self.exit_process(instr.operand);
                }
            }
        }
    }

    fn access(&mut self, vpage: usize, is_write: bool) {
        self.total_cost += cost::READ_WRITE;
        let pidx = self.current_pid.expect("access before any `c` instruction");

        self.processes[pidx].page_table[vpage].referenced = true;

        if !self.processes[pidx].page_table[vpage].present {
            self.processes[pidx].page_table[vpage].modified = false;
            if !self.page_fault(pidx, vpage) {
                return;
            }
        }

        if is_write && self.processes[pidx].page_table[vpage].write_protect {
            self.processes[pidx].cost.segprot += 1;
            self.total_cost += cost::SEGPROT;
            self.emit(TraceEvent::Segprot);
        } else if is_write {
            self.processes[pidx].page_table[vpage].modified = true;
        }
    }

    /// Returns `false` on SEGV (instruction is abandoned for this page).
    fn page_fault(&mut self, pidx: usize, vpage: usize) -> bool {
        let pid = self.processes[pidx].pid;
        {
            let pte = &mut self.processes[pidx].page_table[vpage];
            if !pte.vma_checked {
                pte.vma_checked = true;
                match self.processes[pidx].find_vma(vpage) {
                    Some(vma) => {
                        let (fm, wp) = (vma.file_mapped, vma.write_protect);
                        let pte = &mut self.processes[pidx].page_table[vpage];
                        pte.vma_valid = true;
                        pte.file_mapped = fm;
                        pte.write_protect = wp;
                    }
                    None => {
                        self.processes[pidx].page_table[vpage].vma_valid = false;
                    }
                }
            }
        }

        if !self.processes[pidx].page_table[vpage].vma_valid {
            self.processes[pidx].cost.segv += 1;
            self.total_cost += cost::SEGV;
            self.emit(TraceEvent::Segv);
            return false;
        }

        let frame = self.allocate_frame();
        self.frames[frame].mapped = true;
        self.frames[frame].pid = pid;
        self.frames[frame].vpage = vpage;

        let pte = &mut self.processes[pidx].page_table[vpage];
        pte.present = true;
        pte.frame = frame as u32;

        if pte.paged_out {
            self.processes[pidx].cost.ins += 1;
            self.total_cost += cost::INS;
            self.emit(TraceEvent::In { pid, vpage });
        } else if pte.file_mapped {
            self.processes[pidx].cost.fins += 1;
            self.total_cost += cost::FINS;
            self.emit(TraceEvent::FileIn { pid, vpage });
        } else {
            self.processes[pidx].cost.zeros += 1;
            self.total_cost += cost::ZEROS;
            self.emit(TraceEvent::Zero { pid, vpage });
        }
        self.processes[pidx].cost.maps += 1;
        self.total_cost += cost::MAPS;
        self.emit(TraceEvent::Map { pid, vpage, frame });

        self.pager.age_operation(&mut self.frames, frame, self.instr_count);
        true
    }

    fn allocate_frame(&mut self) -> usize {
        if let Some(f) = self.free_frames.pop_front() {
            return f;
        }

        let victim = self
            .pager
            .select_victim_frame(&mut self.frames, self.instr_count, self.rng);
        let (occ_pid, occ_vpage) = (self.frames[victim].pid, self.frames[victim].vpage);
        let occ_idx = self.proc_index(occ_pid);

        self.processes[occ_idx].cost.unmaps += 1;
        self.total_cost += cost::UNMAPS;
        self.emit(TraceEvent::Unmap {
            pid: occ_pid,
            vpage: occ_vpage,
            frame: victim,
        });

        let occ_pte = &mut self.processes[occ_idx].page_table[occ_vpage];
        occ_pte.present = false;
        if occ_pte.modified {
            occ_pte.modified = false;
            if occ_pte.file_mapped {
                self.processes[occ_idx].cost.fouts += 1;
                self.total_cost += cost::FOUTS;
                self.emit(TraceEvent::FileOut {
                    pid: occ_pid,
                    vpage: occ_vpage,
                });
            } else {
                occ_pte.paged_out = true;
                self.processes[occ_idx].cost.outs += 1;
                self.total_cost += cost::OUTS;
                self.emit(TraceEvent::Out {
                    pid: occ_pid,
                    vpage: occ_vpage,
                });
            }
        }

        victim
    }

    fn exit_process(&mut self, pid: u32) {
        self.total_cost += cost::EXITS;
        let pidx = self.proc_index(pid);
        for vpage in 0..self.processes[pidx].page_table.len() {
            let pte = self.processes[pidx].page_table[vpage];
            if pte.present {
                let frame = pte.frame as usize;
                self.processes[pidx].cost.unmaps += 1;
                self.total_cost += cost::UNMAPS;
                self.emit(TraceEvent::Unmap { pid, vpage, frame });

                if pte.file_mapped && pte.modified {
                    self.processes[pidx].cost.fouts += 1;
                    self.total_cost += cost::FOUTS;
                    self.emit(TraceEvent::FileOut { pid, vpage });
                }

                self.frames[frame] = Frame::default();
                self.free_frames.push_back(frame);
            }
            let pte = &mut self.processes[pidx].page_table[vpage];
            pte.present = false;
            pte.paged_out = false;
        }
        if self.current_pid == Some(pidx) {
            self.current_pid = None;
        }
    }

    pub fn cost_counters(&self) -> impl Iterator<Item = (u32, &CostCounters)> {
        self.processes.iter().map(|p| (p.pid, &p.cost))
    }
}
