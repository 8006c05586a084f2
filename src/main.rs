use std::io::{self, Write};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use count_locs::{
    count_locs, parse_invocation, resolve_root, Invocation, ParseOutcome, Report, USAGE,
};
use env_logger::Env;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let invocation = match parse_invocation(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(ParseOutcome::Info(text)) => {
            print!("{text}");
            return;
        }
        Err(outcome) => {
            eprintln!("Usage: {USAGE}");
            process::exit(outcome.exit_code());
        }
    };

    if let Err(err) = run(&invocation) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

fn run(invocation: &Invocation) -> Result<()> {
    let start = Instant::now();

    let root = resolve_root(&invocation.directory).context("Failed to resolve directory")?;
    log::debug!("counting under {}", root.display());

    let results = count_locs(&root, &invocation.patterns)?;
    for failure in &results.failures {
        eprintln!("{failure}");
    }

    let report = Report {
        results: &results,
        pattern_count: invocation.patterns.len(),
        elapsed: start.elapsed(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.write_to(&mut out)?;
    out.flush()?;
    Ok(())
}
