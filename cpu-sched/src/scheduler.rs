//! Scheduling policies (§5): FCFS, LCFS, RR, SRTF, PRIO, PREPRIO.
//!
//! Every policy implements [`Scheduler`], which owns the ready-queue
//! storage and hands the simulation driver one process at a time. Only
//! [`Scheduler::quantum`] and [`Scheduler::preemptive`] vary the driver's
//! behavior beyond queue order; everything else (CPU-burst bookkeeping,
//! I/O, event scheduling) lives in `simulation.rs`.
use std::collections::VecDeque;

use crate::process::ProcessRef;

pub trait Scheduler {
    /// Called when a process enters READY (including on arrival).
    fn add_process(&mut self, p: ProcessRef);

    /// Pop the next process to run, if any are ready.
    fn next_process(&mut self) -> Option<ProcessRef>;

    /// `None` means run until blocking or completion (FCFS/LCFS/SRTF/PRIO);
    /// `Some(q)` caps a burst at `q` time units (RR/PREPRIO).
    fn quantum(&self) -> Option<i64>;

    /// Called on a quantum-expiry preemption, before the process is handed
    /// back to `add_process`. No-op except for the priority schedulers,
    /// which decrement `dynamic_prio`.
    fn decay(&mut self, _p: &ProcessRef) {}

    /// PREPRIO only: an arriving/unblocked process with strictly higher
    /// dynamic priority than the running process preempts it immediately.
    fn preemptive(&self) -> bool {
        false
    }

    /// Short label for the `-v` verbose trace header, e.g. `"RR 2"`.
    fn label(&self) -> String;
}

/// FCFS and LCFS differ only in which end of the queue receives new
/// arrivals; both run non-preemptively to completion or I/O.
pub struct FifoLike {
    queue: VecDeque<ProcessRef>,
    push_front: bool,
}

impl FifoLike {
    pub fn fcfs() -> Self {
        Self {
            queue: VecDeque::new(),
            push_front: false,
        }
    }

    pub fn lcfs() -> Self {
        Self {
            queue: VecDeque::new(),
            push_front: true,
        }
    }
}

impl Scheduler for FifoLike {
    fn add_process(&mut self, p: ProcessRef) {
        if self.push_front {
            self.queue.push_front(p);
        } else {
            self.queue.push_back(p);
        }
    }

    fn next_process(&mut self) -> Option<ProcessRef> {
        self.queue.pop_front()
    }

    fn quantum(&self) -> Option<i64> {
        None
    }

    fn label(&self) -> String {
        if self.push_front {
            "LCFS".to_string()
        } else {
            "FCFS".to_string()
        }
    }
}

pub struct RoundRobin {
    queue: VecDeque<ProcessRef>,
    quantum: i64,
}

impl RoundRobin {
    pub fn new(quantum: i64) -> Self {
        Self {
            queue: VecDeque::new(),
            quantum,
        }
    }
}

impl Scheduler for RoundRobin {
    fn add_process(&mut self, p: ProcessRef) {
        self.queue.push_back(p);
    }

    fn next_process(&mut self) -> Option<ProcessRef> {
        self.queue.pop_front()
    }

    fn quantum(&self) -> Option<i64> {
        Some(self.quantum)
    }

    fn label(&self) -> String {
        format!("RR {}", self.quantum)
    }
}

/// Shortest remaining-time first. The ready queue is unordered storage;
/// selection is a linear scan for least `remaining_cpu`, ties broken by
/// which process has been READY longest (lowest `state_done_events`,
/// i.e. it was marked ready at an earlier point in the event stream).
pub struct Srtf {
    queue: Vec<ProcessRef>,
}

impl Srtf {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }
}

impl Default for Srtf {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for Srtf {
    fn add_process(&mut self, p: ProcessRef) {
        self.queue.push(p);
    }

    fn next_process(&mut self) -> Option<ProcessRef> {
        if self.queue.is_empty() {
            return None;
        }
        let mut best = 0;
        for i in 1..self.queue.len() {
            let cand = self.queue[i].borrow();
            let cur = self.queue[best].borrow();
            let better = (cand.remaining_cpu, cand.state_done_events)
                < (cur.remaining_cpu, cur.state_done_events);
            drop(cand);
            drop(cur);
            if better {
                best = i;
            }
        }
        Some(self.queue.remove(best))
    }

    fn quantum(&self) -> Option<i64> {
        None
    }

    fn label(&self) -> String {
        "SRTF".to_string()
    }
}

/// Priority scheduler with active/expired queue pairs, one `VecDeque` per
/// priority level. A process whose dynamic priority is exhausted (would go
/// negative) drops into the expired side with its priority reset; when the
/// active side runs dry the two sides swap.
pub struct PriorityScheduler {
    maxprio: i32,
    quantum: i64,
    active: Vec<VecDeque<ProcessRef>>,
    expired: Vec<VecDeque<ProcessRef>>,
    preemptive: bool,
}

impl PriorityScheduler {
    pub fn new(quantum: i64, maxprio: i32, preemptive: bool) -> Self {
        let maxprio = maxprio.max(1);
        Self {
            maxprio,
            quantum,
            active: (0..maxprio).map(|_| VecDeque::new()).collect(),
            expired: (0..maxprio).map(|_| VecDeque::new()).collect(),
            preemptive,
        }
    }

    fn level_index(&self, dynamic_prio: i32) -> usize {
        (self.maxprio - 1 - dynamic_prio).clamp(0, self.maxprio - 1) as usize
    }

    fn swap_if_active_exhausted(&mut self) {
        if self.active.iter().all(VecDeque::is_empty) {
            std::mem::swap(&mut self.active, &mut self.expired);
        }
    }
}

impl Scheduler for PriorityScheduler {
    fn add_process(&mut self, p: ProcessRef) {
        let dp = p.borrow().dynamic_prio;
        if dp < 0 {
            p.borrow_mut().dynamic_prio = p.borrow().static_prio - 1;
            let idx = self.level_index(p.borrow().dynamic_prio);
            self.expired[idx].push_back(p);
        } else {
            let idx = self.level_index(dp);
            self.active[idx].push_back(p);
        }
    }

    fn next_process(&mut self) -> Option<ProcessRef> {
        self.swap_if_active_exhausted();
        for q in self.active.iter_mut() {
            if let Some(p) = q.pop_front() {
                return Some(p);
            }
        }
        None
    }

    fn quantum(&self) -> Option<i64> {
        Some(self.quantum)
    }

    fn preemptive(&self) -> bool {
        self.preemptive
    }

    fn decay(&mut self, p: &ProcessRef) {
        p.borrow_mut().dynamic_prio -= 1;
    }

    fn label(&self) -> String {
        if self.preemptive {
            format!("PREPRIO {}", self.quantum)
        } else {
            format!("PRIO {}", self.quantum)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::new_ref;

    #[test]
    fn fcfs_is_insertion_order() {
        let mut s = FifoLike::fcfs();
        s.add_process(new_ref(0, 0, 1, 1, 1, 0));
        s.add_process(new_ref(1, 0, 1, 1, 1, 0));
        assert_eq!(s.next_process().unwrap().borrow().pid, 0);
        assert_eq!(s.next_process().unwrap().borrow().pid, 1);
    }

    #[test]
    fn lcfs_is_reverse_insertion_order() {
        let mut s = FifoLike::lcfs();
        s.add_process(new_ref(0, 0, 1, 1, 1, 0));
        s.add_process(new_ref(1, 0, 1, 1, 1, 0));
        assert_eq!(s.next_process().unwrap().borrow().pid, 1);
        assert_eq!(s.next_process().unwrap().borrow().pid, 0);
    }

    #[test]
    fn srtf_picks_least_remaining_cpu() {
        let mut s = Srtf::new();
        let a = new_ref(0, 0, 100, 1, 1, 0);
        let b = new_ref(1, 0, 10, 1, 1, 0);
        a.borrow_mut().remaining_cpu = 100;
        b.borrow_mut().remaining_cpu = 10;
        s.add_process(a);
        s.add_process(b);
        assert_eq!(s.next_process().unwrap().borrow().pid, 1);
    }

    #[test]
    fn priority_scheduler_swaps_when_active_drains() {
        let mut s = PriorityScheduler::new(2, 4, false);
        let p = new_ref(0, 0, 10, 10, 10, 1);
        p.borrow_mut().dynamic_prio = -1;
        s.add_process(p);
        let got = s.next_process().unwrap();
        assert_eq!(got.borrow().pid, 0);
    }
}
