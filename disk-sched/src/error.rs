//! CLI and workload-parsing failure modes (§7).
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoSchedError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown scheduler algorithm {{ijscf}} -{0}")]
    UnknownAlgorithm(char),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed input at line {line_no}: {line}")]
    MalformedInput { line_no: usize, line: String },
}

pub type Result<T> = std::result::Result<T, IoSchedError>;
