//! Shared primitives used by all four coursework simulators.
//!
//! Each core (linker, cpu-sched, mmu, disk-sched) is its own crate so that it
//! can ship its own CLI binary and error type, but the deterministic random
//! stream and the logging bootstrap are the same everywhere and live here.

pub mod logging;
pub mod rng;

pub use rng::{RandomStream, RandomStreamError};
