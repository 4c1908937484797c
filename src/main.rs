//! Demo test binary.
//!
//! Declares a couple of suites covering every outcome and hands control to the
//! harness. `MainTests::JustNotWork2` fails a hard assertion, so the run stops
//! there and `AfterHalt` never executes.

#[macro_use]
extern crate log;

use selftest::{assert_true, expect_true, suite};

suite!(MainTests {
    fn JustWork(t) {
        assert_true!(t, true);
    }

    fn JustWork2(t) {
        expect_true!(t, true);
    }

    fn ThrowException(_t) {
        anyhow::bail!("thrown value: {}", 2);
    }

    fn JustNotWork1(t) {
        expect_true!(t, false);
    }

    fn JustNotWork2(t) {
        assert_true!(t, false);
    }
});

suite!(AfterHalt {
    fn NeverRuns(t) {
        info!("unreachable after a hard failure");
        assert_true!(t, true);
    }
});

selftest::run_all_tests!();
