/// Hard check: fail the current test and halt the run when `cond` is false.
#[macro_export]
macro_rules! assert_true {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.assert_true($cond, stringify!($cond))
    };
}

/// Soft check: fail the current test when `cond` is false, keep running the
/// remaining tests.
#[macro_export]
macro_rules! expect_true {
    ($ctx:expr, $cond:expr $(,)?) => {
        $ctx.expect_true($cond, stringify!($cond))
    };
}

/// Declare a suite of tests.
///
/// Each `fn name(ctx) { ... }` becomes a test named `name` in the suite. `ctx`
/// is bound to the [`TestContext`](crate::TestContext) of the running test, and
/// the body may use `?` on any error convertible into `anyhow::Error`.
///
/// The suite expands to a module of the same name holding the test functions,
/// and registers itself with the global [`Registry`](crate::Registry).
///
/// ```ignore
/// selftest::suite!(Parser {
///     fn empty_input(t) {
///         selftest::assert_true!(t, parse("").is_empty());
///     }
///
///     fn bad_number(t) {
///         let n: i32 = "12".parse()?;
///         selftest::expect_true!(t, n == 12);
///     }
/// });
/// ```
#[macro_export]
macro_rules! suite {
    ($suite:ident { $( $(#[$attr:meta])* fn $name:ident ( $ctx:ident ) $body:block )* }) => {
        #[allow(non_snake_case)]
        pub mod $suite {
            #[allow(unused_imports)]
            use super::*;

            $(
                $(#[$attr])*
                #[allow(non_snake_case, unused_variables, unreachable_code)]
                pub fn $name($ctx: &$crate::TestContext<'_>) -> $crate::TestResult {
                    $body
                    Ok(())
                }
            )*

            fn __register(registry: &mut $crate::Registry) {
                registry
                    .suite(stringify!($suite))
                    $( .test(stringify!($name), $name) )*;
            }

            #[$crate::__private::distributed_slice($crate::__private::SUITES)]
            #[linkme(crate = $crate::__private::linkme)]
            static __SUITE: $crate::__private::SuiteDecl = $crate::__private::SuiteDecl {
                file: file!(),
                line: line!(),
                register: __register,
            };
        }
    };
}

/// Generate `fn main` running every registered test.
///
/// The process exits with the code returned by [`test_main`](crate::test_main).
#[macro_export]
macro_rules! run_all_tests {
    () => {
        fn main() {
            ::std::process::exit($crate::test_main())
        }
    };
}
