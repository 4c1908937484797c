//! Self-registering unit test harness.
//!
//! Tests are declared with [`suite!`], collected into a process-wide
//! [`Registry`] before the runner starts, and executed in declaration order by
//! [`TestRunner`]. Each test finishes in exactly one of four states:
//! passed, hard assertion failure, soft failure, or exception. A hard
//! assertion failure stops the whole run.
//!
//! ```ignore
//! use selftest::{assert_true, expect_true, suite};
//!
//! suite!(MathTests {
//!     fn addition(t) {
//!         assert_true!(t, 2 + 2 == 4);
//!     }
//!
//!     fn rounding(t) {
//!         expect_true!(t, (0.1_f64 + 0.2).to_string() == "0.3");
//!     }
//! });
//!
//! selftest::run_all_tests!();
//! ```

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod logger;
pub mod registry;
pub mod runner;
pub mod test_framework;
pub mod test_framework_basic;

mod macros;

pub use config::{ColorChoice, Config};
pub use error::{SelftestError, SelftestResult};
pub use registry::{Registry, SuiteBuilder};
pub use runner::{
    EXIT_ALL_PASSED, EXIT_FAILURES, EXIT_HALTED, EXIT_USAGE, RunOutcome, TestRunner, TestStats,
    test_main, test_main_with,
};
pub use test_framework::{Abort, TestBody, TestCase, TestContext, TestResult, Testable};
pub use test_framework_basic::{StatusCell, TestStatus};

#[doc(hidden)]
pub mod __private {
    pub use crate::registry::{SUITES, SuiteDecl};
    pub use linkme::{self, distributed_slice};
}
