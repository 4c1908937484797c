//! Logger implementation for the log crate.
//!
//! Diagnostics go to stderr. Test reports are written by the runner to their
//! own sink and never pass through here.

use core::fmt::{self, Display};
use core::sync::atomic::{AtomicBool, Ordering};
use std::io::{self, Write};
use std::time::Instant;

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{SelftestError, SelftestResult};

lazy_static! {
    static ref START: Instant = Instant::now();
}

static LOGGER: SimpleLogger = SimpleLogger {
    color: AtomicBool::new(false),
};

pub struct SimpleLogger {
    color: AtomicBool,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCode {
    Red = 31,
    Green = 32,
    Yellow = 33,
    Cyan = 36,
    BrightBlack = 90,
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{1B}[{}m", *self as u8)
    }
}

impl ColorCode {
    fn for_level(level: Level) -> Self {
        match level {
            Level::Error => ColorCode::Red,
            Level::Warn => ColorCode::Yellow,
            Level::Info => ColorCode::Green,
            Level::Debug => ColorCode::Cyan,
            Level::Trace => ColorCode::BrightBlack,
        }
    }
}

const COLOR_RESET: &str = "\u{1B}[0m";

/// `[secs file:line] message`, optionally wrapped in the level's color.
fn format_line(
    level: Level,
    secs: f64,
    file: &str,
    line: u32,
    args: &fmt::Arguments<'_>,
    color: bool,
) -> String {
    if color {
        let args_color = ColorCode::for_level(level);
        format!("[{secs:.5} {file}:{line}] {args_color}{args}{COLOR_RESET}")
    } else {
        format!("[{secs:.5} {file}:{line}] {level} {args}")
    }
}

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(
            record.level(),
            START.elapsed().as_secs_f64(),
            record.file().unwrap_or("none"),
            record.line().unwrap_or(0),
            record.args(),
            self.color.load(Ordering::Relaxed),
        );
        let _ = writeln!(io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Initialize the logger.
pub fn init(level: LevelFilter, color: bool) -> SelftestResult<()> {
    lazy_static::initialize(&START);
    log::set_logger(&LOGGER).map_err(|_| SelftestError::LoggerInitFailed)?;
    LOGGER.color.store(color, Ordering::Relaxed);
    log::set_max_level(level);
    debug!("Logger initialized with level: {level}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_line_has_level_and_location() {
        let line = format_line(
            Level::Warn,
            1.5,
            "src/lib.rs",
            12,
            &format_args!("hello {}", 42),
            false,
        );
        assert_eq!(line, "[1.50000 src/lib.rs:12] WARN hello 42");
    }

    #[test]
    fn colored_line_wraps_message() {
        let line = format_line(
            Level::Error,
            0.0,
            "a.rs",
            1,
            &format_args!("boom"),
            true,
        );
        assert_eq!(line, "[0.00000 a.rs:1] \u{1B}[31mboom\u{1B}[0m");
    }

    #[test]
    fn second_init_fails() {
        let _ = init(LevelFilter::Off, false);
        assert!(matches!(
            init(LevelFilter::Off, false),
            Err(SelftestError::LoggerInitFailed)
        ));
    }
}
