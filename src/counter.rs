use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

/// Number of non-blank lines in the file at `path`.
///
/// A file that cannot be opened counts as zero lines.
pub fn count_lines(path: &Path) -> u64 {
    match File::open(path) {
        Ok(file) => count_reader(BufReader::new(file)),
        Err(err) => {
            debug!("cannot open {}: {err}", path.display());
            0
        }
    }
}

/// Lines whose content is non-empty once surrounding whitespace is trimmed.
/// Invalid UTF-8 is decoded lossily; a read error ends the scan early.
pub fn count_reader<R: BufRead>(mut reader: R) -> u64 {
    let mut count = 0;
    let mut line_buf = Vec::new();

    loop {
        line_buf.clear();
        match reader.read_until(b'\n', &mut line_buf) {
            Ok(0) => break,
            Ok(_) => {
                if !String::from_utf8_lossy(&line_buf).trim().is_empty() {
                    count += 1;
                }
            }
            Err(err) => {
                debug!("read stopped early: {err}");
                break;
            }
        }
    }

    count
}
