//! CLI and workload-parsing failure modes (§7).
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MmuError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown pager algorithm {{fcaewr}} -{0}")]
    UnknownAlgorithm(char),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed input at line {line_no}: {line}")]
    MalformedInput { line_no: usize, line: String },

    #[error(transparent)]
    RandomStream(#[from] sim_common::RandomStreamError),
}

pub type Result<T> = std::result::Result<T, MmuError>;
