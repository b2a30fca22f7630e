// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The narrow interface to an external timing runtime.
//!
//! The harness only declares suites and hands over invocations. Measurement,
//! repetition, statistics and reporting all belong to the implementor.

use std::fmt;

use crate::backend::InvocationFn;

/// Registration primitives of a timing runtime.
pub trait TimingRuntime {
    /// Declare a named suite. `body` performs the registration sweep.
    fn declare_suite(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn SuiteScope));
}

/// Handle for registering benchmarks inside one suite.
pub trait SuiteScope {
    /// Register one timed unit. The runtime owns `invocation` from here on.
    fn declare_benchmark(&mut self, name: &str, invocation: InvocationFn);
}

/// A benchmark captured by [`RecordingRuntime`].
pub struct RecordedBenchmark {
    pub name: String,
    pub invocation: InvocationFn,
}

impl fmt::Debug for RecordedBenchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordedBenchmark")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A suite captured by [`RecordingRuntime`].
#[derive(Debug, Default)]
pub struct RecordedSuite {
    pub name: String,
    pub benchmarks: Vec<RecordedBenchmark>,
}

impl RecordedSuite {
    pub fn benchmark_names(&self) -> Vec<&str> {
        self.benchmarks.iter().map(|b| b.name.as_str()).collect()
    }
}

impl SuiteScope for RecordedSuite {
    fn declare_benchmark(&mut self, name: &str, invocation: InvocationFn) {
        self.benchmarks.push(RecordedBenchmark {
            name: name.to_string(),
            invocation,
        });
    }
}

/// Records registrations without timing anything.
#[derive(Debug, Default)]
pub struct RecordingRuntime {
    suites: Vec<RecordedSuite>,
}

impl RecordingRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suites(&self) -> &[RecordedSuite] {
        &self.suites
    }

    pub fn suite(&self, name: &str) -> Option<&RecordedSuite> {
        self.suites.iter().find(|s| s.name == name)
    }

    pub fn into_suites(self) -> Vec<RecordedSuite> {
        self.suites
    }

    /// Total benchmarks across all suites.
    pub fn benchmark_count(&self) -> usize {
        self.suites.iter().map(|s| s.benchmarks.len()).sum()
    }
}

impl TimingRuntime for RecordingRuntime {
    fn declare_suite(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn SuiteScope)) {
        let mut suite = RecordedSuite {
            name: name.to_string(),
            benchmarks: Vec::new(),
        };
        body(&mut suite);
        self.suites.push(suite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Transformed;

    #[test]
    fn test_recording_runtime_captures_registrations() {
        let mut runtime = RecordingRuntime::new();

        runtime.declare_suite("transform", &mut |scope: &mut dyn SuiteScope| {
            scope.declare_benchmark("a", Box::new(|| Ok(Transformed::default())));
            scope.declare_benchmark("b", Box::new(|| Ok(Transformed::default())));
        });

        let suite = runtime.suite("transform").unwrap();
        assert_eq!(suite.benchmark_names(), vec!["a", "b"]);
        assert_eq!(runtime.benchmark_count(), 2);
        assert!((suite.benchmarks[0].invocation)().is_ok());
    }

    #[test]
    fn test_empty_suite_is_recorded() {
        let mut runtime = RecordingRuntime::new();
        runtime.declare_suite("empty", &mut |_scope: &mut dyn SuiteScope| {});

        assert_eq!(runtime.suites().len(), 1);
        assert_eq!(runtime.benchmark_count(), 0);
    }
}
