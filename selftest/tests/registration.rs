use pretty_assertions::assert_eq;
use selftest::{
    Registry, RunOutcome, TestCase, TestContext, TestRunner, TestStatus, Testable, assert_true,
    expect_true, suite,
};

suite!(Arithmetic {
    fn adds(t) {
        assert_true!(t, 2 + 2 == 4);
    }

    fn parses(t) {
        let n: i32 = "12".parse()?;
        expect_true!(t, n == 12);
    }

    fn rounds(t) {
        let sum = 0.1_f64 + 0.2;
        expect_true!(t, sum == 0.3);
    }
});

suite!(Strings {
    /// Concatenation of two literals.
    fn concat(t) {
        assert_true!(t, format!("{}{}", "a", "b") == "ab");
    }

    fn throws(_t) {
        anyhow::bail!("unrelated failure");
    }
});

fn paths(registry: &Registry) -> Vec<String> {
    registry.all().iter().map(|test| test.full_path()).collect()
}

#[test]
fn suites_register_in_declaration_order() {
    assert_eq!(
        paths(Registry::global()),
        vec![
            "Arithmetic::adds",
            "Arithmetic::parses",
            "Arithmetic::rounds",
            "Strings::concat",
            "Strings::throws",
        ]
    );
}

#[test]
fn global_registry_is_built_once() {
    assert!(std::ptr::eq(Registry::global(), Registry::global()));
}

#[test]
fn global_run_classifies_every_test() {
    let mut runner = TestRunner::new(Vec::new());
    let outcome = runner
        .run_all(Registry::global())
        .expect("writing to a Vec");

    let report = String::from_utf8(runner.into_inner()).expect("utf-8 report");
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec![
            "Arithmetic::adds PASSED",
            "Arithmetic::parses PASSED",
            "Arithmetic::rounds EXCEPT",
            "Strings::concat PASSED",
            "Strings::throws THREW EXCEPTION",
            "ALL TESTS PASSED",
        ]
    );
    assert_eq!(outcome, RunOutcome::CompletedWithFailures);
}

#[test]
fn generated_functions_run_standalone() {
    let case = TestCase::new("Arithmetic", "rounds", Arithmetic::rounds);
    let ctx = TestContext::new(&case);
    case.run(&ctx);
    assert_eq!(case.status(), TestStatus::SoftFailed);

    let case = TestCase::new("Strings", "concat", Strings::concat);
    let ctx = TestContext::new(&case);
    case.run(&ctx);
    assert_eq!(case.status(), TestStatus::Passed);
}
