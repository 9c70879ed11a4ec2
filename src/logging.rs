//! Logging setup for dupscan.
//!
//! Uses the `log` facade with an `env_logger` backend. The level comes from,
//! in priority order:
//!
//! 1. `RUST_LOG`, when set
//! 2. `-q` (errors only) or `-v` / `-vv` (debug / trace)
//! 3. Info otherwise
//!
//! Records are tagged with the emitting thread so messages from concurrent
//! scan workers (`dupscan-worker-N`) can be told apart. Debug builds also
//! print a timestamp and, from `-v` up, the module path.
//!
//! ```rust,no_run
//! use dupscan::logging::init_logging;
//!
//! init_logging(1, false); // debug
//! log::debug!("Worker pool ready");
//! ```

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Install the global logger.
///
/// Calling it again after a logger is installed is a no-op, which keeps
/// repeated runs inside one test process safe.
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    let level = level_for(verbose, quiet);

    let mut builder = Builder::new();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(level);
    }

    let show_module = verbose >= 1;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        let thread = std::thread::current();
        let thread = thread.name().unwrap_or("main");

        if cfg!(debug_assertions) {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        write!(buf, "{style}{:<5}{style:#} ", record.level())?;
        if show_module {
            write!(buf, "[{}] ", record.module_path().unwrap_or("unknown"))?;
        }
        if thread != "main" {
            write!(buf, "({thread}) ")?;
        }
        writeln!(buf, "{}", record.args())
    });

    if builder.try_init().is_err() {
        return;
    }

    if from_env {
        log::debug!("Log level taken from RUST_LOG");
    } else {
        log::debug!("Log level: {:?}", level);
    }
}

/// Map the CLI verbosity flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}
