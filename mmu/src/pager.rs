//! Victim-selection policies (§4.2). Each pager drives a hand that sweeps
//! the frame table; `select_victim_frame` is called only when `free_frames`
//! is empty.
use sim_common::RandomStream;

use crate::memory::Frame;

const WORKING_SET_TAU: i64 = 49;
const NRU_RESET_INTERVAL: i64 = 50;

pub trait Pager {
    fn select_victim_frame(
        &mut self,
        frames: &mut [Frame],
        instr_count: i64,
        rng: &mut RandomStream,
    ) -> usize;

    /// Called after a successful page-in, no-op except for aging/working-set.
    fn age_operation(&mut self, _frames: &mut [Frame], _frame: usize, _instr_count: i64) {}

    fn label(&self) -> &'static str;
}

pub struct Fifo {
    hand: usize,
}

impl Fifo {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl Pager for Fifo {
    fn select_victim_frame(&mut self, frames: &mut [Frame], _ic: i64, _rng: &mut RandomStream) -> usize {
        let victim = self.hand;
        self.hand = (self.hand + 1) % frames.len();
        victim
    }

    fn label(&self) -> &'static str {
        "FIFO"
    }
}

pub struct Clock {
    hand: usize,
}

impl Clock {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl Pager for Clock {
    fn select_victim_frame(&mut self, frames: &mut [Frame], _ic: i64, _rng: &mut RandomStream) -> usize {
        let n = frames.len();
        loop {
            if !frames[self.hand].referenced {
                let victim = self.hand;
                self.hand = (self.hand + 1) % n;
                return victim;
            }
            frames[self.hand].referenced = false;
            self.hand = (self.hand + 1) % n;
        }
    }

    fn label(&self) -> &'static str {
        "CLOCK"
    }
}

pub struct Nru {
    hand: usize,
    last_reset: i64,
}

impl Nru {
    pub fn new() -> Self {
        Self {
            hand: 0,
            last_reset: 0,
        }
    }
}

impl Pager for Nru {
    fn select_victim_frame(&mut self, frames: &mut [Frame], instr_count: i64, _rng: &mut RandomStream) -> usize {
        let n = frames.len();
        let reset = instr_count - self.last_reset >= NRU_RESET_INTERVAL;
        let mut class_first: [Option<usize>; 4] = [None, None, None, None];

        let mut i = self.hand;
        for _ in 0..n {
            let f = &mut frames[i];
            let class = (f.referenced as usize) * 2 + (f.modified as usize);
            if class_first[class].is_none() {
                class_first[class] = Some(i);
            }
            if reset {
                f.referenced = false;
            } else if class_first[0].is_some() {
                break;
            }
            i = (i + 1) % n;
        }
        if reset {
            self.last_reset = instr_count;
        }

        let victim = class_first
            .into_iter()
            .flatten()
            .next()
            .expect("frame table is non-empty");
        self.hand = (victim + 1) % n;
        victim
    }

    fn label(&self) -> &'static str {
        "NRU"
    }
}

pub struct Aging {
    hand: usize,
}

impl Aging {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl Pager for Aging {
    fn select_victim_frame(&mut self, frames: &mut [Frame], _ic: i64, _rng: &mut RandomStream) -> usize {
        let n = frames.len();
        let mut best = self.hand;
        let mut i = self.hand;
        for step in 0..n {
            let f = &mut frames[i];
            f.age >>= 1;
            if f.referenced {
                f.age |= 0x8000_0000;
                f.referenced = false;
            }
            if step == 0 || f.age < frames[best].age {
                best = i;
            }
            i = (i + 1) % n;
        }
        self.hand = (best + 1) % n;
        best
    }

    fn age_operation(&mut self, frames: &mut [Frame], frame: usize, _instr_count: i64) {
        frames[frame].age = 0;
    }

    fn label(&self) -> &'static str {
        "AGING"
    }
}

pub struct WorkingSet {
    hand: usize,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self { hand: 0 }
    }
}

impl Pager for WorkingSet {
    fn select_victim_frame(&mut self, frames: &mut [Frame], instr_count: i64, _rng: &mut RandomStream) -> usize {
        let n = frames.len();
        let mut fallback = self.hand;
        let mut fallback_age = i64::MAX;
        let mut i = self.hand;
        for _ in 0..n {
            let f = &mut frames[i];
            if f.referenced {
                f.last_used = instr_count;
                f.referenced = false;
            } else if instr_count - f.last_used > WORKING_SET_TAU {
                self.hand = (i + 1) % n;
                return i;
            } else if f.last_used < fallback_age {
                fallback_age = f.last_used;
                fallback = i;
            }
            i = (i + 1) % n;
        }
        self.hand = (fallback + 1) % n;
        fallback
    }

    fn age_operation(&mut self, frames: &mut [Frame], frame: usize, instr_count: i64) {
        frames[frame].last_used = instr_count;
    }

    fn label(&self) -> &'static str {
        "WORKINGSET"
    }
}

pub struct Random;

impl Random {
    pub fn new() -> Self {
        Self
    }
}

impl Pager for Random {
    fn select_victim_frame(&mut self, frames: &mut [Frame], _ic: i64, rng: &mut RandomStream) -> usize {
        rng.next_zero_indexed(frames.len() as u32) as usize
    }

    fn label(&self) -> &'static str {
        "RANDOM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_advances_in_order() {
        let mut frames = vec![Frame::default(); 3];
        let mut rng = RandomStream::from_values(vec![0]);
        let mut p = Fifo::new();
        assert_eq!(p.select_victim_frame(&mut frames, 0, &mut rng), 0);
        assert_eq!(p.select_victim_frame(&mut frames, 0, &mut rng), 1);
    }

    #[test]
    fn clock_skips_referenced_frames() {
        let mut frames = vec![Frame::default(); 2];
        frames[0].referenced = true;
        let mut rng = RandomStream::from_values(vec![0]);
        let mut p = Clock::new();
        assert_eq!(p.select_victim_frame(&mut frames, 0, &mut rng), 1);
        assert!(!frames[0].referenced);
    }

    #[test]
    fn aging_prefers_lowest_age() {
        let mut frames = vec![Frame::default(); 2];
        frames[0].age = 5;
        frames[1].age = 2;
        let mut rng = RandomStream::from_values(vec![0]);
        let mut p = Aging::new();
        let victim = p.select_victim_frame(&mut frames, 0, &mut rng);
        assert_eq!(victim, 1);
    }
}
