use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};

pub const USAGE: &str = "count_locs <directory> <glob-patterns>...";

pub const VERSION: &str = concat!("version ", env!("CARGO_PKG_VERSION"));

const EXAMPLES: &str = "\
Examples:
  count_locs ./src \"**/*.rs\" \"**/*.ts\"
  count_locs ./ \"**/*.css\"";

/// Count non-blank lines of code under a directory, grouped by glob pattern.
#[derive(Parser, Debug)]
#[command(
    name = "count_locs",
    version = VERSION,
    override_usage = USAGE,
    after_help = EXAMPLES,
    disable_version_flag = true
)]
pub struct Args {
    /// Root directory the patterns are matched against
    pub directory: PathBuf,

    /// Glob patterns relative to the directory (`**` spans subdirectories)
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,

    /// Show version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub directory: PathBuf,
    pub patterns: Vec<String>,
}

impl From<Args> for Invocation {
    fn from(args: Args) -> Self {
        Self {
            directory: args.directory,
            patterns: args.patterns,
        }
    }
}

/// Why parsing stopped before producing an [`Invocation`].
#[derive(Debug)]
pub enum ParseOutcome {
    /// Help or version was requested; the rendered text goes to stdout.
    Info(String),
    Usage,
}

impl ParseOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseOutcome::Info(_) => 0,
            ParseOutcome::Usage => 1,
        }
    }
}

/// Flags are only honoured as the sole argument; with two or more arguments
/// every token is a directory or pattern, even if it starts with `-`.
pub fn parse_invocation<I, T>(args: I) -> Result<Invocation, ParseOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() > 2 {
        args.insert(1, OsString::from("--"));
    }

    match Args::try_parse_from(args) {
        Ok(args) => Ok(args.into()),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Err(ParseOutcome::Info(err.render().to_string()))
            }
            _ => Err(ParseOutcome::Usage),
        },
    }
}
