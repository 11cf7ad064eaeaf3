//! Console verbosity for progress and diagnostics.
//!
//! - **Quiet** (`-q`): warnings, errors and generated file paths only
//! - **Default**: loaded table, summaries and progress lines
//! - **Verbose** (`-v`): also the resolved configuration and stage timings
//!
//! Warnings go to stderr at every level.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Default = 1,
    Verbose = 2,
}

impl Verbosity {
    /// Level selected by the `-q` / `-v` flags (clap rejects both at once).
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }
}

/// Process-wide level, written once in `main`.
static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the level for the rest of the process.
pub fn init(level: Verbosity) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Current level.
pub fn level() -> Verbosity {
    match LEVEL.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Default,
    }
}

/// Print only with `-v`.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::level() >= $crate::verbose::Verbosity::Verbose {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// Print unless `-q` was given.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::level() >= $crate::verbose::Verbosity::Default {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Print a `warning:` line to stderr regardless of level.
macro_rules! wprintln {
    ($($arg:tt)*) => {
        eprintln!("warning: {}", format_args!($($arg)*));
    };
}

pub(crate) use wprintln;

/// Reports how long a pipeline stage took when dropped, in verbose mode.
///
/// ```ignore
/// let _t = StageTimer::start("aggregate");
/// // prints "  [aggregate] 41.7µs" on drop
/// ```
pub struct StageTimer {
    stage: &'static str,
    start: Instant,
}

impl StageTimer {
    /// Start timing `stage`.
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        if level() == Verbosity::Verbose {
            println!("  [{}] {:.1?}", self.stage, self.start.elapsed());
        }
    }
}
