//! Disk I/O request entity (§3.4).
#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub id: usize,
    pub arrive_time: i64,
    pub target_track: i64,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl Request {
    pub fn new(id: usize, arrive_time: i64, target_track: i64) -> Self {
        Self {
            id,
            arrive_time,
            target_track,
            start_time: None,
            end_time: None,
        }
    }
}
