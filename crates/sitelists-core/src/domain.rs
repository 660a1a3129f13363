//! Domain string helpers shared by every source adapter.

use std::io::{self, BufRead};

/// Character the site store uses in place of `.` inside domain keys.
pub const DOT_PLACEHOLDER: char = '#';

/// Lines this short (after stripping terminators) are treated as noise.
pub const MIN_LINE_LEN: usize = 4;

/// Translate a store-encoded domain (`foo#bar#com`) back to `foo.bar.com`.
pub fn decode_placeholder(encoded: &str) -> String {
    encoded.replace(DOT_PLACEHOLDER, ".")
}

/// Strip trailing `\n` / `\r\n` from a raw line.
pub fn strip_line_end(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Read-side cleanup for one-domain-per-line inputs.
///
/// Returns `None` for lines that are too short to hold a domain.
pub fn clean_list_line(line: &str) -> Option<&str> {
    let line = strip_line_end(line);
    if line.len() > MIN_LINE_LEN {
        Some(line)
    } else {
        None
    }
}

/// Lines of `reader` without their `\n`. Bytes that are not UTF-8 are
/// replaced with U+FFFD, so a stray Latin-1 line never aborts a read.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}
