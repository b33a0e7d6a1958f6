//! Workload file parsing (§6.3): `#`-commented lines, each `arrival_time
//! track`, assigned ids in file order.
use std::io::BufRead;

use crate::error::{IoSchedError, Result};
use crate::request::Request;

pub fn load_requests(reader: impl BufRead) -> Result<Vec<Request>> {
    let mut out = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IoSchedError::Io {
            path: "<workload>".to_string(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(IoSchedError::MalformedInput {
                line_no: line_no + 1,
                line: line.clone(),
            });
        }
        let parse = |s: &str| -> Result<i64> {
            s.parse().map_err(|_| IoSchedError::MalformedInput {
                line_no: line_no + 1,
                line: line.clone(),
            })
        };
        let arrive_time = parse(fields[0])?;
        let track = parse(fields[1])?;
        out.push(Request::new(out.len(), arrive_time, track));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_two_field_lines_skipping_comments() {
        let data = "# header\n0 5\n1 10\n";
        let reqs = load_requests(Cursor::new(data)).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].id, 0);
        assert_eq!(reqs[1].target_track, 10);
    }

    #[test]
    fn rejects_malformed_line() {
        let data = "0 5 99\n";
        assert!(load_requests(Cursor::new(data)).is_err());
    }
}
