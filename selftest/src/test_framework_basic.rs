use core::sync::atomic::{AtomicU8, Ordering};

/// Outcome of a single test.
///
/// Every test starts as `NotRun` and ends in one of the four reportable
/// states once its body has completed.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    #[default]
    NotRun = 0,
    Passed = 1,
    AssertFailed = 2,
    SoftFailed = 3,
    Exception = 4,
}

impl TestStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    /// A hard assertion failure ends the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TestStatus::AssertFailed)
    }

    /// Whether a check has already attributed a failure to the test.
    pub fn is_check_failure(&self) -> bool {
        matches!(self, TestStatus::AssertFailed | TestStatus::SoftFailed)
    }

    /// The word printed after `<suite>::<name>` in the report.
    pub fn report_tag(&self) -> &'static str {
        match self {
            TestStatus::NotRun => "NOT RUN",
            TestStatus::Passed => "PASSED",
            TestStatus::AssertFailed => "ASSERT",
            TestStatus::SoftFailed => "EXCEPT",
            TestStatus::Exception => "THREW EXCEPTION",
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => TestStatus::Passed,
            2 => TestStatus::AssertFailed,
            3 => TestStatus::SoftFailed,
            4 => TestStatus::Exception,
            _ => TestStatus::NotRun,
        }
    }
}

/// Interior-mutable status slot.
///
/// Test entities live in a shared registry, so their status is written
/// through `&self`.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    pub const fn new() -> Self {
        Self(AtomicU8::new(TestStatus::NotRun as u8))
    }

    pub fn get(&self) -> TestStatus {
        TestStatus::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, status: TestStatus) {
        self.0.store(status as u8, Ordering::Relaxed);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
