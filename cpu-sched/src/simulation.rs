//! Discrete-event simulation driver (§4): dispatches events in
//! `(timestamp, eid)` order, mutating process state and pushing follow-on
//! events, and invokes the scheduler once all events at a given timestamp
//! have been drained.
use sim_common::RandomStream;

use crate::event::{Event, State, Transition};
use crate::process::ProcessRef;
use crate::queue::EventQueue;
use crate::scheduler::Scheduler;

pub struct Trace {
    pub verbose: bool,
    pub show_eligible: bool,
    pub show_preempt: bool,
}

pub struct Simulation<'a> {
    pub scheduler: &'a mut dyn Scheduler,
    pub rng: &'a mut RandomStream,
    events: EventQueue,
    current_time: i64,
    current_running: Option<ProcessRef>,
    call_scheduler: bool,
    events_processed: i64,
    total_io_busy: i64,
    io_active_until: Option<i64>,
    trace: Trace,
    log: Vec<String>,
}

fn draw_burst(rng: &mut RandomStream, cap: i64, remaining: i64) -> i64 {
    let v = rng.next_one_indexed(cap as u32) as i64;
    v.min(remaining)
}

impl<'a> Simulation<'a> {
    pub fn new(scheduler: &'a mut dyn Scheduler, rng: &'a mut RandomStream, trace: Trace) -> Self {
        Self {
            scheduler,
            rng,
            events: EventQueue::new(),
            current_time: 0,
            current_running: None,
            call_scheduler: false,
            events_processed: 0,
            total_io_busy: 0,
            io_active_until: None,
            trace,
            log: Vec::new(),
        }
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn schedule_arrival(&mut self, process: ProcessRef, at: i64) {
        self.events
            .push(process, at, State::Created, State::Ready, Transition::ToReady);
    }

    fn trace_line(&mut self, evt: &Event, extra: &str) {
        if !self.trace.verbose {
            return;
        }
        let p = evt.process.borrow();
        self.log.push(format!(
            "{}: {} {} {} -> {}{}",
            evt.timestamp,
            p.pid,
            evt.timestamp - p.state_ts,
            evt.old_state.as_str(),
            evt.new_state.as_str(),
            extra,
        ));
    }

    fn mark_io_busy(&mut self, from: i64, to: i64) {
        if to <= from {
            return;
        }
        match self.io_active_until {
            Some(until) if until >= from => {
                if to > until {
                    self.total_io_busy += to - until;
                    self.io_active_until = Some(to);
                }
            }
            _ => {
                self.total_io_busy += to - from;
                self.io_active_until = Some(to);
            }
        }
    }

    pub fn total_io_time(&self) -> i64 {
        self.total_io_busy
    }

    pub fn run(&mut self) {
        loop {
            let Some(now) = self.events.next_event_time() else {
                break;
            };
            self.current_time = now;

            while self.events.next_event_time() == Some(now) {
                let evt = self.events.pop_min().expect("time matched above");
                self.events_processed += 1;
                self.dispatch(evt);
            }

            if self.call_scheduler {
                self.call_scheduler = false;
                if self.current_running.is_none() {
                    if let Some(p) = self.scheduler.next_process() {
                        self.start_running(p, now);
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, evt: Event) {
        match evt.transition {
            Transition::ToReady => self.on_to_ready(evt),
            Transition::ToRun => unreachable!("ToRun is driven synchronously, never queued"),
            Transition::ToBlock => self.on_to_block(evt),
            Transition::ToPreempt => self.on_to_preempt(evt),
        }
    }

    fn on_to_ready(&mut self, evt: Event) {
        self.trace_line(&evt, "");
        {
            let mut p = evt.process.borrow_mut();
            p.state_ts = evt.timestamp;
            p.state_done_events = self.events_processed;
            p.dynamic_prio = p.static_prio - 1;
        }

        if self.scheduler.preemptive() {
            if let Some(running) = self.current_running.clone() {
                let running_prio = running.borrow().dynamic_prio;
                let arriving_prio = evt.process.borrow().dynamic_prio;
                if arriving_prio > running_prio {
                    if let Some(remaining_time) = self
                        .events
                        .pending_time(running.borrow().pid)
                        .filter(|&t| t != self.current_time)
                    {
                        self.events.remove_pending(running.borrow().pid);
                        {
                            let mut r = running.borrow_mut();
                            let unconsumed = remaining_time - self.current_time;
                            r.remaining_cpu += unconsumed;
                            r.remaining_burst += unconsumed;
                        }
                        self.current_running = None;
                        self.scheduler.add_process(running);
                        self.call_scheduler = true;
                    }
                }
            }
        }

        self.scheduler.add_process(evt.process);
        self.call_scheduler = true;
    }

    fn start_running(&mut self, process: ProcessRef, now: i64) {
        let burst = {
            let mut p = process.borrow_mut();
            let wait = now - p.state_ts;
            p.wait_time += wait;
            let b = if p.remaining_burst > 0 {
                p.remaining_burst
            } else {
                draw_burst(self.rng, p.max_cpu_burst, p.remaining_cpu)
            };
            p.remaining_burst = 0;
            p.state_ts = now;
            b
        };

        let capped = match self.scheduler.quantum() {
            Some(q) if q < burst => q,
            _ => burst,
        };
        let preempted = capped < burst;

        if self.trace.verbose {
            let pid = process.borrow().pid;
            let old = State::Ready.as_str();
            self.log.push(format!(
                "{}: {} {} {} -> RUNNG{}",
                now,
                pid,
                0,
                old,
                if preempted { " cb=-1" } else { "" },
            ));
        }

        let remaining_after = process.borrow().remaining_cpu - capped;
        if remaining_after <= 0 {
            process.borrow_mut().remaining_cpu = 0;
            process.borrow_mut().finish_time = now + capped;
            self.current_running = None;
            self.call_scheduler = true;
            return;
        }

        process.borrow_mut().remaining_cpu = remaining_after;
        if preempted {
            process.borrow_mut().remaining_burst = burst - capped;
        }
        self.current_running = Some(process.clone());

        let transition = if preempted {
            Transition::ToPreempt
        } else {
            Transition::ToBlock
        };
        self.events
            .push(process, now + capped, State::Running, State::Ready, transition);
    }

    fn on_to_block(&mut self, evt: Event) {
        self.trace_line(&evt, "");
        let io_burst = {
            let mut p = evt.process.borrow_mut();
            p.state_ts = evt.timestamp;
            let b = draw_burst(self.rng, p.max_io_burst, i64::MAX);
            p.io_time += b;
            b
        };
        self.mark_io_busy(evt.timestamp, evt.timestamp + io_burst);
        self.current_running = None;
        self.events.push(
            evt.process,
            evt.timestamp + io_burst,
            State::Block,
            State::Ready,
            Transition::ToReady,
        );
        self.call_scheduler = true;
    }

    /// Quantum-expiry preemption, distinct from `TO_READY`: the process goes
    /// straight back to the scheduler's ready storage with its decayed
    /// priority and carried-over burst intact, skipping the arrival/unblock
    /// reset that `on_to_ready` applies.
    fn on_to_preempt(&mut self, evt: Event) {
        self.trace_line(&evt, "");
        evt.process.borrow_mut().state_ts = evt.timestamp;
        self.scheduler.decay(&evt.process);
        self.current_running = None;
        self.scheduler.add_process(evt.process);
        self.call_scheduler = true;
    }
}
