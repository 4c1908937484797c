//! Test registry.
//!
//! Every [`suite!`](crate::suite) contributes one [`SuiteDecl`] to the
//! [`SUITES`] linker slice. The global registry is assembled from that slice
//! the first time it is requested and never changes afterwards.

use core::fmt;

use lazy_static::lazy_static;
use linkme::distributed_slice;

use crate::test_framework::{TestCase, TestContext, TestResult, Testable};

/// A suite declared with [`suite!`](crate::suite), as collected at link time.
#[derive(Clone, Copy)]
pub struct SuiteDecl {
    pub file: &'static str,
    pub line: u32,
    /// Appends the suite's tests, in declaration order.
    pub register: fn(&mut Registry),
}

#[distributed_slice]
pub static SUITES: [SuiteDecl] = [..];

lazy_static! {
    static ref GLOBAL: Registry = Registry::from_decls(&SUITES);
}

/// Ordered, append-only collection of tests.
#[derive(Default)]
pub struct Registry {
    tests: Vec<Box<dyn Testable>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { tests: Vec::new() }
    }

    /// The process-wide registry holding every declared suite.
    ///
    /// Built on first access. Suites are ordered by source file, then line.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Build a registry from suite declarations.
    pub fn from_decls(decls: &[SuiteDecl]) -> Self {
        let mut ordered: Vec<&SuiteDecl> = decls.iter().collect();
        ordered.sort_by_key(|decl| (decl.file, decl.line));

        let mut registry = Self::new();
        for decl in ordered {
            (decl.register)(&mut registry);
        }
        debug!(
            "Registered {} tests from {} suites",
            registry.len(),
            decls.len()
        );
        registry
    }

    pub fn register<T: Testable + 'static>(&mut self, test: T) {
        self.register_boxed(Box::new(test));
    }

    pub fn register_boxed(&mut self, test: Box<dyn Testable>) {
        trace!("Registering {}", test.full_path());
        self.tests.push(test);
    }

    /// Start adding tests under the suite `name`.
    pub fn suite(&mut self, name: &'static str) -> SuiteBuilder<'_> {
        SuiteBuilder {
            registry: self,
            suite: name,
        }
    }

    /// All tests, in registration order.
    pub fn all(&self) -> &[Box<dyn Testable>] {
        &self.tests
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tests.iter().map(|test| test.full_path()))
            .finish()
    }
}

/// Adds [`TestCase`]s sharing one suite name.
pub struct SuiteBuilder<'a> {
    registry: &'a mut Registry,
    suite: &'static str,
}

impl SuiteBuilder<'_> {
    pub fn name(&self) -> &'static str {
        self.suite
    }

    pub fn test<F>(self, name: &'static str, body: F) -> Self
    where
        F: Fn(&TestContext<'_>) -> TestResult + Send + Sync + 'static,
    {
        self.registry.register(TestCase::new(self.suite, name, body));
        self
    }
}
