//! Error types for the harness itself.
//!
//! Test bodies report their own errors through [`TestResult`](crate::TestResult),
//! which is an alias for `anyhow::Result<()>`; anything they return turns the
//! test into an exception. [`SelftestError`] covers failures of the harness:
//!
//! ```ignore
//! logger::init(LevelFilter::Info, false)?;
//! runner.run_all(Registry::global())?;
//! ```

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum SelftestError {
    #[error("Logger already initialized")]
    LoggerInitFailed,
    #[error("Failed to write test report: {0}")]
    Report(#[from] io::Error),
}

pub type SelftestResult<T> = Result<T, SelftestError>;
