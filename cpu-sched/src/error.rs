//! CLI-level failure modes (§7): a malformed `-s` scheduler spec or a
//! missing/unreadable workload or rfile. The simulation itself never
//! produces an error once it starts (the workload is assumed well-formed).
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown scheduler type {{FLSRPE}} -{0}")]
    UnknownSchedulerType(char),

    #[error("invalid scheduler param: <{0}>")]
    InvalidSchedulerParam(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed workload line {line_no}: {line}")]
    MalformedWorkloadLine { line_no: usize, line: String },

    #[error(transparent)]
    RandomStream(#[from] sim_common::RandomStreamError),
}

pub type Result<T> = std::result::Result<T, SchedError>;
