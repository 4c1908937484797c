//! Test runner module
//!
//! [`TestRunner`] walks a [`Registry`] in order, runs each test and writes one
//! report line per test. A hard assertion failure stops the walk. The
//! [`test_main`] entry point wires this up for the global registry and turns the
//! outcome into a process exit code.

use std::ffi::OsString;
use std::io::{self, Write};
use std::panic;

use clap::Parser;

use crate::config::Config;
use crate::error::SelftestResult;
use crate::logger;
use crate::registry::Registry;
use crate::test_framework::{TestContext, Testable, panic_message};
use crate::test_framework_basic::TestStatus;

/// Every test passed.
pub const EXIT_ALL_PASSED: i32 = 0;
/// The run completed but some tests failed softly or threw.
pub const EXIT_FAILURES: i32 = 1;
/// The run was halted by a hard assertion failure.
pub const EXIT_HALTED: i32 = 2;
/// The command line or `LOG` could not be parsed.
pub const EXIT_USAGE: i32 = 64;

/// Summary line printed when the run was not halted.
pub const ALL_PASSED_LINE: &str = "ALL TESTS PASSED";

// Test statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TestStats {
    pub total: usize,
    pub passed: usize,
    pub assert_failed: usize,
    pub soft_failed: usize,
    pub exceptions: usize,
}

impl TestStats {
    pub const fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            assert_failed: 0,
            soft_failed: 0,
            exceptions: 0,
        }
    }

    pub fn add_result(&mut self, status: TestStatus) {
        self.total += 1;
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::AssertFailed => self.assert_failed += 1,
            TestStatus::SoftFailed => self.soft_failed += 1,
            TestStatus::Exception | TestStatus::NotRun => self.exceptions += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.assert_failed + self.soft_failed + self.exceptions
    }
}

/// How a whole run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    AllPassed,
    CompletedWithFailures,
    /// Stopped by a hard assertion failure in `test`.
    Halted { test: String },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::AllPassed => EXIT_ALL_PASSED,
            RunOutcome::CompletedWithFailures => EXIT_FAILURES,
            RunOutcome::Halted { .. } => EXIT_HALTED,
        }
    }
}

// Test runner
pub struct TestRunner<W> {
    out: W,
    stats: TestStats,
}

impl<W: Write> TestRunner<W> {
    /// Runner writing its report lines to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            stats: TestStats::new(),
        }
    }

    /// Run one test and report its final status.
    pub fn run_test(&mut self, test: &dyn Testable) -> SelftestResult<TestStatus> {
        debug!("Running test: {}", test.full_path());

        let ctx = TestContext::new(test);
        test.run(&ctx);

        let status = match test.status() {
            TestStatus::NotRun => {
                warn!("{} finished without a status", test.full_path());
                test.set_status(TestStatus::Exception);
                TestStatus::Exception
            }
            status => status,
        };

        writeln!(self.out, "{} {}", test.full_path(), status.report_tag())?;
        self.stats.add_result(status);

        Ok(status)
    }

    /// Run every test of `registry` in order.
    ///
    /// Returns early with [`RunOutcome::Halted`] on the first hard assertion
    /// failure; no later test is run and no summary is written.
    pub fn run_all(&mut self, registry: &Registry) -> SelftestResult<RunOutcome> {
        self.stats = TestStats::new();

        if registry.is_empty() {
            warn!("No tests found!");
        }

        for test in registry.all() {
            match self.run_test(test.as_ref())? {
                TestStatus::AssertFailed => {
                    self.out.flush()?;
                    error!("{} failed a hard assertion, halting", test.full_path());
                    return Ok(RunOutcome::Halted {
                        test: test.full_path(),
                    });
                }
                TestStatus::Passed
                | TestStatus::SoftFailed
                | TestStatus::Exception
                | TestStatus::NotRun => {}
            }
        }

        writeln!(self.out, "{ALL_PASSED_LINE}")?;
        self.out.flush()?;
        self.print_final_stats();

        if self.stats.failed() == 0 {
            Ok(RunOutcome::AllPassed)
        } else {
            Ok(RunOutcome::CompletedWithFailures)
        }
    }

    fn print_final_stats(&self) {
        let stats = &self.stats;
        let msg = format!(
            ">>> Test results: {} passed, {} soft failed, {} exceptions, {} total",
            stats.passed, stats.soft_failed, stats.exceptions, stats.total
        );
        if stats.failed() > 0 {
            warn!("{msg}");
        } else {
            info!("{msg}");
        }
    }

    pub fn get_stats(&self) -> TestStats {
        self.stats
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Route panic reports through the logger.
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let msg = panic_message(info.payload());
        if let Some(location) = info.location() {
            error!(
                "Panicked at {}:{} {}",
                location.file(),
                location.line(),
                msg
            );
        } else {
            error!("Panicked: {}", msg);
        }
    }));
}

fn execute<W: Write>(config: &Config, registry: &Registry, mut out: W) -> i32 {
    if config.list {
        let listed = registry
            .all()
            .iter()
            .try_for_each(|test| writeln!(out, "{}", test.full_path()))
            .and_then(|()| out.flush());
        return match listed {
            Ok(()) => EXIT_ALL_PASSED,
            Err(err) => {
                error!("Failed to list tests: {err}");
                EXIT_FAILURES
            }
        };
    }

    match TestRunner::new(out).run_all(registry) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            error!("{err}");
            EXIT_FAILURES
        }
    }
}

/// Run `registry` as a test binary would, reporting to stdout.
pub fn test_main_with(config: &Config, registry: &Registry) -> i32 {
    if let Err(err) = logger::init(config.log, config.color.enabled()) {
        eprintln!("{err}");
    }
    install_panic_hook();

    execute(config, registry, io::stdout().lock())
}

/// Run every registered test with configuration taken from the command line.
///
/// # Returns
/// The process exit code: [`EXIT_ALL_PASSED`], [`EXIT_FAILURES`],
/// [`EXIT_HALTED`] or [`EXIT_USAGE`]. `--help` and `--version` exit directly.
///
/// # Example
/// ```ignore
/// fn main() {
///     std::process::exit(selftest::test_main());
/// }
/// ```
pub fn test_main() -> i32 {
    match parse_config(std::env::args_os()) {
        Ok(config) => test_main_with(&config, Registry::global()),
        Err(code) => code,
    }
}

/// Parse the command line, mapping usage errors to [`EXIT_USAGE`].
fn parse_config<I, T>(args: I) -> Result<Config, i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Config::try_parse_from(args) {
        Ok(config) => Ok(config),
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            Err(EXIT_USAGE)
        }
    }
}
