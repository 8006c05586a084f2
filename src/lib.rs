//
// lib.rs
// count_locs
//
// Library entry that re-exports modules so the binary and the integration tests share argument parsing, pattern expansion, line counting, and reporting.
//
// Thales Matheus Mendonça Santos - October 2026
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod counter;
pub mod error;
pub mod locs;
pub mod report;
pub mod scanner;

pub use cli::{parse_invocation, Invocation, ParseOutcome, USAGE};
pub use counter::count_lines;
pub use error::LocError;
pub use locs::{count_locs, PatternResults};
pub use report::Report;
pub use scanner::resolve_root;
