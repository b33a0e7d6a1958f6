//! Process identity and runtime state (§3.2).
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a [`Process`]. The event queue and the scheduler's ready
/// queues both hold clones of the same handle, mirroring the raw `Process*`
/// aliasing in the original simulator without `unsafe`.
pub type ProcessRef = Rc<RefCell<Process>>;

#[derive(Debug)]
pub struct Process {
    pub pid: u32,
    pub arrival_time: i64,
    pub total_cpu: i64,
    pub max_cpu_burst: i64,
    pub max_io_burst: i64,
    pub static_prio: i32,

    /// Timestamp of the most recent state transition.
    pub state_ts: i64,
    /// Count of events processed at the moment this process last entered
    /// READY; the SRTF tie-breaker.
    pub state_done_events: i64,
    pub remaining_cpu: i64,
    /// Carry-over CPU burst after a quantum preemption; 0 means "draw a
    /// fresh burst next time this process runs."
    pub remaining_burst: i64,
    pub dynamic_prio: i32,
    pub wait_time: i64,
    pub io_time: i64,
    pub finish_time: i64,
}

impl Process {
    pub fn new(
        pid: u32,
        arrival_time: i64,
        total_cpu: i64,
        max_cpu_burst: i64,
        max_io_burst: i64,
        static_prio: i32,
    ) -> Self {
        Self {
            pid,
            arrival_time,
            total_cpu,
            max_cpu_burst,
            max_io_burst,
            static_prio,
            state_ts: arrival_time,
            state_done_events: -1,
            remaining_cpu: total_cpu,
            remaining_burst: 0,
            dynamic_prio: static_prio - 1,
            wait_time: 0,
            io_time: 0,
            finish_time: 0,
        }
    }

    pub fn turnaround(&self) -> i64 {
        self.finish_time - self.arrival_time
    }
}

pub fn new_ref(
    pid: u32,
    arrival_time: i64,
    total_cpu: i64,
    max_cpu_burst: i64,
    max_io_burst: i64,
    static_prio: i32,
) -> ProcessRef {
    Rc::new(RefCell::new(Process::new(
        pid,
        arrival_time,
        total_cpu,
        max_cpu_burst,
        max_io_burst,
        static_prio,
    )))
}
