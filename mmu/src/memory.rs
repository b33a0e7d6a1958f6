//! Page table, VMA, and frame table entities (§3.3).

pub const MAX_VPAGE: usize = 64;

/// Page-table entry, named fields instead of the original's packed bitfield
/// (see REDESIGN FLAGS) — compilers lay out a `bool`-and-`u32` struct just as
/// compactly, and named fields read better than shift-and-mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pte {
    pub present: bool,
    pub referenced: bool,
    pub modified: bool,
    pub paged_out: bool,
    pub frame: u32,
    pub vma_checked: bool,
    pub write_protect: bool,
    pub file_mapped: bool,
    pub vma_valid: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Vma {
    pub start_vpage: usize,
    pub end_vpage: usize,
    pub write_protect: bool,
    pub file_mapped: bool,
}

impl Vma {
    pub fn contains(&self, vpage: usize) -> bool {
        vpage >= self.start_vpage && vpage <= self.end_vpage
    }
}

/// Reverse mapping from a physical frame back to its occupant, plus the
/// `age` field the aging/working-set pagers use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    pub mapped: bool,
    pub pid: u32,
    pub vpage: usize,
    pub age: u32,
    pub last_used: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CostCounters {
    pub unmaps: u64,
    pub maps: u64,
    pub ins: u64,
    pub fins: u64,
    pub outs: u64,
    pub fouts: u64,
    pub zeros: u64,
    pub segv: u64,
    pub segprot: u64,
}

pub struct Process {
    pub pid: u32,
    pub page_table: Vec<Pte>,
    pub vmas: Vec<Vma>,
    pub cost: CostCounters,
}

impl Process {
    pub fn new(pid: u32, vmas: Vec<Vma>) -> Self {
        Self {
            pid,
            page_table: vec![Pte::default(); MAX_VPAGE],
            vmas,
            cost: CostCounters::default(),
        }
    }

    pub fn find_vma(&self, vpage: usize) -> Option<&Vma> {
        self.vmas.iter().find(|v| v.contains(vpage))
    }
}

/// Per-operation cost table in simulated cycles (§4.2).
pub mod cost {
    pub const READ_WRITE: u64 = 1;
    pub const SWITCHES: u64 = 130;
    pub const EXITS: u64 = 1250;
    pub const MAPS: u64 = 300;
    pub const UNMAPS: u64 = 400;
    pub const INS: u64 = 3100;
    pub const OUTS: u64 = 2700;
    pub const FINS: u64 = 2800;
    pub const FOUTS: u64 = 2400;
    pub const ZEROS: u64 = 140;
    pub const SEGV: u64 = 340;
    pub const SEGPROT: u64 = 420;
}
