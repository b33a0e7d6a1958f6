//! Two-pass relocating linker (§4.4, §6.4, §7).
//!
//! The hard part of this crate is the tokenizer and the two-pass
//! symbol-resolution algorithm in [`linker`]; everything else (CLI parsing,
//! file I/O) is a thin shell around [`Linker::run`].
pub mod error;
pub mod linker;
pub mod tokenizer;

pub use error::{LinkerError, Result};
pub use linker::Linker;
