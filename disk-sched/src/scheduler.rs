//! Head-movement policies (§4.3). Each scheduler owns its pending-request
//! storage; the driver asks it for the next request to service and may get
//! its travel `direction` updated in the process.
use std::collections::VecDeque;

use crate::request::Request;

pub trait IoScheduler {
    fn add_request(&mut self, r: Request);

    /// Pop the next request to service, updating `*direction` if the
    /// policy reverses or otherwise fixes the head's travel direction.
    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request>;

    fn is_empty(&self) -> bool;

    fn label(&self) -> &'static str;
}

pub struct Fifo {
    queue: VecDeque<Request>,
}

impl Fifo {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl IoScheduler for Fifo {
    fn add_request(&mut self, r: Request) {
        self.queue.push_back(r);
    }

    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request> {
        let r = self.queue.pop_front()?;
        set_direction(direction, current_track, r.target_track);
        Some(r)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn label(&self) -> &'static str {
        "FIFO"
    }
}

fn set_direction(direction: &mut i64, from: i64, to: i64) {
    if to > from {
        *direction = 1;
    } else if to < from {
        *direction = -1;
    }
}

pub struct Sstf {
    queue: Vec<Request>,
}

impl Sstf {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }
}

impl IoScheduler for Sstf {
    fn add_request(&mut self, r: Request) {
        self.queue.push(r);
    }

    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request> {
        if self.queue.is_empty() {
            return None;
        }
        let mut best = 0;
        for i in 1..self.queue.len() {
            if (self.queue[i].target_track - current_track).abs()
                < (self.queue[best].target_track - current_track).abs()
            {
                best = i;
            }
        }
        let r = self.queue.remove(best);
        set_direction(direction, current_track, r.target_track);
        Some(r)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn label(&self) -> &'static str {
        "SSTF"
    }
}

/// Shared selection for LOOK-family schedulers: among `queue`, prefer the
/// closest request in `direction`; if none exists, reverse and pick the
/// closest the other way.
fn look_select(queue: &mut Vec<Request>, current_track: i64, direction: &mut i64) -> Option<Request> {
    if queue.is_empty() {
        return None;
    }
    let forward: Vec<usize> = (0..queue.len())
        .filter(|&i| {
            if *direction >= 0 {
                queue[i].target_track >= current_track
            } else {
                queue[i].target_track <= current_track
            }
        })
        .collect();

    let candidates = if !forward.is_empty() {
        forward
    } else {
        *direction = -*direction;
        (0..queue.len()).collect()
    };

    let mut best = candidates[0];
    for &i in &candidates[1..] {
        if (queue[i].target_track - current_track).abs() < (queue[best].target_track - current_track).abs() {
            best = i;
        }
    }
    Some(queue.remove(best))
}

pub struct Look {
    queue: Vec<Request>,
}

impl Look {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }
}

impl IoScheduler for Look {
    fn add_request(&mut self, r: Request) {
        self.queue.push(r);
    }

    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request> {
        look_select(&mut self.queue, current_track, direction)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn label(&self) -> &'static str {
        "LOOK"
    }
}

/// C-LOOK always advances up; once nothing is `>= current_track` it wraps
/// to the smallest target overall rather than reversing.
pub struct CLook {
    queue: Vec<Request>,
}

impl CLook {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }
}

impl IoScheduler for CLook {
    fn add_request(&mut self, r: Request) {
        self.queue.push(r);
    }

    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request> {
        if self.queue.is_empty() {
            return None;
        }
        *direction = 1;
        let mut best = None;
        for i in 0..self.queue.len() {
            if self.queue[i].target_track >= current_track {
                if best.is_none() || self.queue[i].target_track < self.queue[best.unwrap()].target_track {
                    best = Some(i);
                }
            }
        }
        let idx = best.unwrap_or_else(|| {
            let mut lowest = 0;
            for i in 1..self.queue.len() {
                if self.queue[i].target_track < self.queue[lowest].target_track {
                    lowest = i;
                }
            }
            lowest
        });
        Some(self.queue.remove(idx))
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn label(&self) -> &'static str {
        "C-LOOK"
    }
}

/// Two queues: new requests always land in `add`; when `active` empties the
/// two are swapped. Selection within `active` is plain LOOK.
pub struct FLook {
    active: Vec<Request>,
    add: Vec<Request>,
}

impl FLook {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            add: Vec::new(),
        }
    }

    fn swap_if_active_exhausted(&mut self) {
        if self.active.is_empty() {
            std::mem::swap(&mut self.active, &mut self.add);
        }
    }
}

impl IoScheduler for FLook {
    fn add_request(&mut self, r: Request) {
        self.add.push(r);
        self.swap_if_active_exhausted();
    }

    fn pop_next(&mut self, current_track: i64, direction: &mut i64) -> Option<Request> {
        self.swap_if_active_exhausted();
        look_select(&mut self.active, current_track, direction)
    }

    fn is_empty(&self) -> bool {
        self.active.is_empty() && self.add.is_empty()
    }

    fn label(&self) -> &'static str {
        "F-LOOK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sstf_picks_closest_request() {
        let mut s = Sstf::new();
        s.add_request(Request::new(0, 0, 50));
        s.add_request(Request::new(1, 0, 10));
        let mut dir = 1;
        let r = s.pop_next(0, &mut dir).unwrap();
        assert_eq!(r.target_track, 10);
    }

    #[test]
    fn look_reverses_when_nothing_ahead() {
        let mut s = Look::new();
        s.add_request(Request::new(0, 0, 5));
        let mut dir = 1;
        let r = s.pop_next(20, &mut dir).unwrap();
        assert_eq!(r.target_track, 5);
        assert_eq!(dir, -1);
    }

    #[test]
    fn clook_wraps_to_lowest_when_nothing_above() {
        let mut s = CLook::new();
        s.add_request(Request::new(0, 0, 5));
        s.add_request(Request::new(1, 0, 80));
        let mut dir = 1;
        let first = s.pop_next(50, &mut dir).unwrap();
        assert_eq!(first.target_track, 80);
        let second = s.pop_next(80, &mut dir).unwrap();
        assert_eq!(second.target_track, 5);
    }
}
