//! Deterministic, file-backed "random" integer stream (§3.1).
//!
//! The rfile format is a count `N` followed by `N` whitespace-separated
//! integers. Each draw pulls `values[i] mod bound`, advances `i` modulo `N`,
//! and wraps back to the start once exhausted. The draw order is part of the
//! observable simulation output, so callers must draw in the exact order the
//! spec prescribes.
use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RandomStreamError {
    #[error("failed to read rfile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("rfile {path} is empty or malformed")]
    Malformed { path: String },
}

pub type Result<T> = std::result::Result<T, RandomStreamError>;

/// A cursor over the values in an rfile.
#[derive(Debug, Clone)]
pub struct RandomStream {
    values: Vec<u32>,
    offset: usize,
}

impl RandomStream {
    /// Load the stream from a path of the form `N\nv0 v1 .. v(N-1)`.
    ///
    /// The leading count is trusted only to the extent of being present;
    /// this mirrors the original reader, which reads it and then just reads
    /// integers until EOF (so a count that disagrees with the actual number
    /// of trailing integers is not an error).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|source| RandomStreamError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        let mut nums = content.split_whitespace();
        nums.next().ok_or_else(|| RandomStreamError::Malformed {
            path: path_ref.display().to_string(),
        })?;
        let values: Vec<u32> = nums.filter_map(|tok| tok.parse().ok()).collect();
        if values.is_empty() {
            return Err(RandomStreamError::Malformed {
                path: path_ref.display().to_string(),
            });
        }
        Ok(Self { values, offset: 0 })
    }

    /// Build a stream directly from values, mainly for tests.
    pub fn from_values(values: Vec<u32>) -> Self {
        Self { values, offset: 0 }
    }

    /// Draw `1 + (raw mod bound)`, the CPU scheduler's `randInt`.
    pub fn next_one_indexed(&mut self, bound: u32) -> u32 {
        1 + self.raw_draw(bound)
    }

    /// Draw `raw mod bound`, the MMU random pager's `randInt`.
    pub fn next_zero_indexed(&mut self, bound: u32) -> u32 {
        self.raw_draw(bound)
    }

    fn raw_draw(&mut self, bound: u32) -> u32 {
        if self.offset >= self.values.len() {
            self.offset = 0;
        }
        let v = self.values[self.offset] % bound;
        self.offset += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around_on_exhaustion() {
        let mut rs = RandomStream::from_values(vec![5, 7, 2]);
        assert_eq!(rs.next_one_indexed(10), 6);
        assert_eq!(rs.next_one_indexed(10), 8);
        assert_eq!(rs.next_one_indexed(10), 3);
        // wraps back to the first value
        assert_eq!(rs.next_one_indexed(10), 6);
    }

    #[test]
    fn zero_indexed_draw() {
        let mut rs = RandomStream::from_values(vec![5]);
        assert_eq!(rs.next_zero_indexed(4), 1);
    }

    #[test]
    fn load_parses_count_then_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rfile");
        std::fs::write(&path, "3\n1\n1\n1\n").unwrap();
        let mut rs = RandomStream::load(&path).unwrap();
        assert_eq!(rs.next_one_indexed(5), 2);
    }
}
