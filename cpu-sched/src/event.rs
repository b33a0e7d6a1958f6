//! Scheduled state transitions (§3.2), ordered by `(timestamp, eid)`.
use crate::process::ProcessRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Created,
    Ready,
    Running,
    Block,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Created => "CREATED",
            State::Ready => "READY",
            State::Running => "RUNNG",
            State::Block => "BLOCK",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    ToReady,
    ToRun,
    ToBlock,
    ToPreempt,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::ToReady => "READY",
            Transition::ToRun => "RUNNG",
            Transition::ToBlock => "BLOCK",
            Transition::ToPreempt => "PREEMPT",
        }
    }
}

pub struct Event {
    pub eid: u64,
    pub process: ProcessRef,
    pub timestamp: i64,
    pub old_state: State,
    pub new_state: State,
    pub transition: Transition,
}
