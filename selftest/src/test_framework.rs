//! Test entities and the checks that run inside them.
//!
//! A test body receives a [`TestContext`] naming the test that is currently
//! executing. The two checks on it, [`TestContext::assert_true`] and
//! [`TestContext::expect_true`], record a failure status on that test and then
//! unwind out of the body with the [`Abort`] signal. [`TestCase::run`] is the
//! boundary that stops the unwind and turns whatever happened into a final
//! [`TestStatus`].

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

use crate::test_framework_basic::{StatusCell, TestStatus};

/// Result returned by a test body. Any error counts as an exception.
pub type TestResult = anyhow::Result<()>;

/// Boxed test body.
pub type TestBody = Box<dyn Fn(&TestContext<'_>) -> TestResult + Send + Sync>;

/// Common interface of every runnable test.
///
/// The runner only ever sees tests through this trait.
pub trait Testable: Send + Sync {
    /// Execute the body once and leave the outcome in [`Testable::status`].
    fn run(&self, ctx: &TestContext<'_>);

    fn name(&self) -> &str;

    fn suite_name(&self) -> &str;

    fn status(&self) -> TestStatus;

    fn set_status(&self, status: TestStatus);

    /// `<suite>::<name>`, as printed in reports.
    fn full_path(&self) -> String {
        format!("{}::{}", self.suite_name(), self.name())
    }
}

/// Signal raised by a failed check to leave the test body.
///
/// It carries no information: whether the check was hard or soft has already
/// been written to the test's status before the signal is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort;

impl Abort {
    /// Unwind out of the current test body.
    ///
    /// Uses `resume_unwind`, so no panic hook fires for the signal.
    pub fn raise() -> ! {
        panic::resume_unwind(Box::new(Abort))
    }

    /// Whether an unwind payload is this signal.
    pub fn is_payload(payload: &(dyn Any + Send)) -> bool {
        payload.is::<Abort>()
    }
}

/// Execution context of the test that is currently running.
///
/// Built by the runner right before [`Testable::run`] and handed to the body.
#[derive(Clone, Copy)]
pub struct TestContext<'a> {
    test: &'a dyn Testable,
}

impl<'a> TestContext<'a> {
    pub fn new(test: &'a dyn Testable) -> Self {
        Self { test }
    }

    /// The test this context belongs to.
    pub fn current(&self) -> &'a dyn Testable {
        self.test
    }

    /// Hard check. A false condition fails the test and stops the run.
    #[track_caller]
    pub fn assert_true(&self, condition: bool, expr: &str) {
        if !condition {
            self.fail(TestStatus::AssertFailed, "assert_true", expr);
        }
    }

    /// Soft check. A false condition fails the test, later tests still run.
    #[track_caller]
    pub fn expect_true(&self, condition: bool, expr: &str) {
        if !condition {
            self.fail(TestStatus::SoftFailed, "expect_true", expr);
        }
    }

    #[track_caller]
    fn fail(&self, status: TestStatus, check: &str, expr: &str) -> ! {
        let location = Location::caller();
        error!(
            "{}: {}!({}) failed at {}:{}",
            self.test.full_path(),
            check,
            expr,
            location.file(),
            location.line()
        );
        self.test.set_status(status);
        Abort::raise()
    }
}

impl fmt::Debug for TestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("test", &self.test.full_path())
            .finish()
    }
}

/// A declared test: static identity plus a body.
pub struct TestCase {
    suite: &'static str,
    name: &'static str,
    body: TestBody,
    status: StatusCell,
}

impl TestCase {
    pub fn new<F>(suite: &'static str, name: &'static str, body: F) -> Self
    where
        F: Fn(&TestContext<'_>) -> TestResult + Send + Sync + 'static,
    {
        Self {
            suite,
            name,
            body: Box::new(body),
            status: StatusCell::new(),
        }
    }
}

impl Testable for TestCase {
    fn run(&self, ctx: &TestContext<'_>) {
        self.status.set(TestStatus::NotRun);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.body)(ctx)));

        // A failure recorded by a check survives whatever the body did after
        // catching the abort.
        if self.status().is_check_failure() {
            if !matches!(&outcome, Err(payload) if Abort::is_payload(&**payload)) {
                debug!("{} left its body after a failed check", self.full_path());
            }
            return;
        }

        match outcome {
            Ok(Ok(())) => self.set_status(TestStatus::Passed),
            Ok(Err(err)) => {
                error!("{} returned an error: {:#}", self.full_path(), err);
                self.set_status(TestStatus::Exception);
            }
            Err(payload) if Abort::is_payload(payload.as_ref()) => {
                warn!("{} aborted outside of a check", self.full_path());
                self.set_status(TestStatus::Exception);
            }
            // The panic hook already logged the message.
            Err(_) => self.set_status(TestStatus::Exception),
        }
    }

    fn name(&self) -> &str {
        self.name
    }

    fn suite_name(&self) -> &str {
        self.suite
    }

    fn status(&self) -> TestStatus {
        self.status.get()
    }

    fn set_status(&self, status: TestStatus) {
        self.status.set(status);
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .field("status", &self.status())
            .finish()
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "Box<dyn Any>"
    }
}
