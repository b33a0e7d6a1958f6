//! Event queue ordered by `(timestamp, eid)` ascending (§4.1, Invariant 2).
//!
//! The original simulator finds a running process's own pending event by a
//! linear scan of the whole queue (`pendingEvent()`); this port keeps an
//! index from pid to that event's queue key instead, which is a strict
//! behavioral no-op (see REDESIGN FLAGS) since a process has at most one
//! event outstanding at any time.
use std::collections::{BTreeMap, HashMap};

use crate::event::{Event, State, Transition};
use crate::process::ProcessRef;

type Key = (i64, u64);

#[derive(Default)]
pub struct EventQueue {
    events: BTreeMap<Key, Event>,
    pending_by_pid: HashMap<u32, Key>,
    next_eid: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        process: ProcessRef,
        timestamp: i64,
        old_state: State,
        new_state: State,
        transition: Transition,
    ) -> u64 {
        let eid = self.next_eid;
        self.next_eid += 1;
        let pid = process.borrow().pid;
        let key = (timestamp, eid);
        self.events.insert(
            key,
            Event {
                eid,
                process,
                timestamp,
                old_state,
                new_state,
                transition,
            },
        );
        self.pending_by_pid.insert(pid, key);
        eid
    }

    pub fn pop_min(&mut self) -> Option<Event> {
        let key = *self.events.keys().next()?;
        let evt = self.events.remove(&key)?;
        let pid = evt.process.borrow().pid;
        if self.pending_by_pid.get(&pid) == Some(&key) {
            self.pending_by_pid.remove(&pid);
        }
        Some(evt)
    }

    pub fn next_event_time(&self) -> Option<i64> {
        self.events.keys().next().map(|(t, _)| *t)
    }

    /// Remove and return the pending event for `pid`, if any.
    pub fn remove_pending(&mut self, pid: u32) -> Option<Event> {
        let key = self.pending_by_pid.remove(&pid)?;
        self.events.remove(&key)
    }

    pub fn pending_time(&self, pid: u32) -> Option<i64> {
        self.pending_by_pid.get(&pid).map(|(t, _)| *t)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::new_ref;

    #[test]
    fn pops_in_timestamp_then_eid_order() {
        let mut q = EventQueue::new();
        let p0 = new_ref(0, 0, 10, 10, 10, 0);
        let p1 = new_ref(1, 0, 10, 10, 10, 0);
        q.push(p1.clone(), 5, State::Created, State::Ready, Transition::ToReady);
        q.push(p0.clone(), 5, State::Created, State::Ready, Transition::ToReady);
        q.push(p0.clone(), 1, State::Created, State::Ready, Transition::ToReady);

        let first = q.pop_min().unwrap();
        assert_eq!(first.timestamp, 1);
        let second = q.pop_min().unwrap();
        assert_eq!(second.timestamp, 5);
        assert_eq!(second.process.borrow().pid, 1);
    }

    #[test]
    fn remove_pending_drops_the_tracked_event() {
        let mut q = EventQueue::new();
        let p0 = new_ref(0, 0, 10, 10, 10, 0);
        q.push(p0.clone(), 5, State::Created, State::Ready, Transition::ToReady);
        assert_eq!(q.pending_time(0), Some(5));
        let removed = q.remove_pending(0).unwrap();
        assert_eq!(removed.timestamp, 5);
        assert!(q.is_empty());
    }
}
