use std::io::{self, Write};
use std::time::Duration;

use crate::locs::PatternResults;

pub struct Report<'a> {
    pub results: &'a PatternResults,
    /// How many patterns were supplied, including ones that failed to compile.
    pub pattern_count: usize,
    pub elapsed: Duration,
}

impl Report<'_> {
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.pattern_count > 1 {
            writeln!(out, "Breakdown of Lines of Code by Glob:")?;
            writeln!(out)?;
            for (pattern, count) in self.results.iter() {
                writeln!(out, "-  {pattern}: {count}")?;
            }
            writeln!(out)?;
        }

        writeln!(out, "Total:\t{} lines of code", self.results.total())?;
        writeln!(out)?;
        writeln!(out, "Elapsed time: {}", format_elapsed(self.elapsed))
    }
}

/// Sub-minute durations use `Duration`'s own rendering (`12ms`, `1.5s`);
/// longer ones are split into hours and minutes as in `1m15.2s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        return format!("{elapsed:?}");
    }

    let nanos = elapsed.subsec_nanos();
    let fraction = if nanos == 0 {
        String::new()
    } else {
        format!(".{nanos:09}").trim_end_matches('0').to_string()
    };
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}{fraction}s")
    } else {
        format!("{minutes}m{seconds}{fraction}s")
    }
}
