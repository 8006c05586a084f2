use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::counter::count_lines;
use crate::error::{LocError, Result};
use crate::scanner::{compile, expand};

/// Per-pattern line counts in the order patterns were first supplied.
#[derive(Debug, Default)]
pub struct PatternResults {
    counts: Vec<(String, u64)>,
    pub failures: Vec<LocError>,
}

impl PatternResults {
    /// Records `count` for `pattern`; a repeated pattern replaces its earlier count.
    pub fn insert(&mut self, pattern: &str, count: u64) {
        match self.counts.iter_mut().find(|(p, _)| p == pattern) {
            Some(entry) => entry.1 = count,
            None => self.counts.push((pattern.to_string(), count)),
        }
    }

    pub fn get(&self, pattern: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(p, _)| p == pattern)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(p, count)| (p.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Counts non-blank lines under `root` for each pattern, using one worker per core.
pub fn count_locs(root: &Path, patterns: &[String]) -> Result<PatternResults> {
    count_locs_with_jobs(root, patterns, num_cpus::get())
}

pub fn count_locs_with_jobs(
    root: &Path,
    patterns: &[String],
    jobs: usize,
) -> Result<PatternResults> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()?;

    let mut results = PatternResults::default();

    for pattern in patterns {
        let compiled = match compile(pattern) {
            Ok(compiled) => compiled,
            Err(err) => {
                results.failures.push(err);
                continue;
            }
        };

        let files = expand(root, &compiled);
        let total = AtomicU64::new(0);
        pool.install(|| count_files(&files, &total));

        let total = total.into_inner();
        debug!("{pattern}: {} files, {total} lines", files.len());
        results.insert(pattern, total);
    }

    Ok(results)
}

fn count_files(files: &[PathBuf], total: &AtomicU64) {
    files.par_iter().for_each(|file| {
        total.fetch_add(count_lines(file), Ordering::Relaxed);
    });
}
