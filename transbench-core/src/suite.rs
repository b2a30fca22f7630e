// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Suite registration.
//!
//! A suite is validated when it is built, then registered in a single pass:
//! every descriptor goes through the loader in declaration order, successes
//! become benchmarks and failures become diagnostics.

use crate::backend::{BackendDescriptor, BackendSet};
use crate::error::{BenchResult, LoadFailure};
use crate::loader::{DiagnosticSink, Loader};
use crate::runtime::{SuiteScope, TimingRuntime};
use crate::types::{BackendName, SuiteName};

/// A named, validated group of backends.
#[derive(Debug, Clone)]
pub struct Suite {
    name: SuiteName,
    backends: BackendSet,
}

/// What one registration sweep did.
#[derive(Debug)]
pub struct SuiteSummary {
    pub suite: SuiteName,
    pub registered: Vec<BackendName>,
    pub skipped: Vec<LoadFailure>,
}

impl SuiteSummary {
    fn new(suite: SuiteName) -> Self {
        Self {
            suite,
            registered: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Backends attempted in this sweep.
    pub fn attempted(&self) -> usize {
        self.registered.len() + self.skipped.len()
    }

    pub fn all_registered(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl Suite {
    /// Build a suite. Duplicate backend names are rejected here, before
    /// anything can reach a runtime.
    pub fn new(
        name: impl Into<String>,
        descriptors: impl IntoIterator<Item = BackendDescriptor>,
    ) -> BenchResult<Self> {
        let name = SuiteName::new(name)?;
        let backends = BackendSet::new(descriptors.into_iter().collect())?;
        Ok(Self { name, backends })
    }

    pub fn from_set(name: SuiteName, backends: BackendSet) -> Self {
        Self { name, backends }
    }

    pub fn name(&self) -> &SuiteName {
        &self.name
    }

    pub fn backends(&self) -> &BackendSet {
        &self.backends
    }

    /// Register every loadable backend with the runtime.
    ///
    /// Backends are loaded one at a time in declaration order; the
    /// diagnostic for a failed backend is reported before the next one is
    /// attempted. A suite where nothing loads is not an error.
    pub fn register(
        &self,
        runtime: &mut dyn TimingRuntime,
        loader: &Loader,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> SuiteSummary {
        let mut summary = SuiteSummary::new(self.name.clone());

        runtime.declare_suite(self.name.as_str(), &mut |scope: &mut dyn SuiteScope| {
            for descriptor in &self.backends {
                match loader.resolve(descriptor) {
                    Ok(loaded) => {
                        scope.declare_benchmark(loaded.name.as_str(), loaded.invocation);
                        summary.registered.push(loaded.name);
                    }
                    Err(failure) => {
                        diagnostics.report(&failure);
                        summary.skipped.push(failure);
                    }
                }
            }
        });

        tracing::info!(
            suite = %self.name,
            registered = summary.registered.len(),
            skipped = summary.skipped.len(),
            "Registered suite"
        );

        summary
    }
}

/// Validate and register a suite in one call.
pub fn register_suite(
    runtime: &mut dyn TimingRuntime,
    name: impl Into<String>,
    descriptors: impl IntoIterator<Item = BackendDescriptor>,
    loader: &Loader,
    diagnostics: &mut dyn DiagnosticSink,
) -> BenchResult<SuiteSummary> {
    let suite = Suite::new(name, descriptors)?;
    Ok(suite.register(runtime, loader, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Handle, Invocation, TransformRequest, Transformed, Transformer};
    use crate::error::{AdaptError, BenchError, HardValidationError, TransformError};
    use crate::resolver::StaticResolver;
    use crate::runtime::RecordingRuntime;
    use crate::types::Locator;
    use std::sync::Arc;

    struct Echo;

    impl Transformer for Echo {
        fn transform(
            &self,
            source: &str,
            _request: &TransformRequest,
        ) -> Result<Transformed, TransformError> {
            Ok(Transformed {
                output: source.as_bytes().to_vec(),
            })
        }
    }

    fn ok(handle: Handle) -> Result<Invocation, AdaptError> {
        Ok(Box::new(move |source: &str| {
            handle.transform(source, &TransformRequest::default())
        }))
    }

    fn descriptor(name: &str, locator: &str) -> BackendDescriptor {
        BackendDescriptor::new(
            BackendName::new(name).unwrap(),
            Locator::new(locator).unwrap(),
            ok,
        )
    }

    fn loader() -> Loader {
        Loader::new(
            StaticResolver::new()
                .with("alpha-lib", Arc::new(Echo))
                .with("gamma-lib", Arc::new(Echo)),
        )
    }

    #[test]
    fn test_register_skips_unresolvable() {
        let mut runtime = RecordingRuntime::new();
        let mut diagnostics: Vec<String> = Vec::new();

        let summary = register_suite(
            &mut runtime,
            "transform",
            vec![descriptor("alpha", "alpha-lib"), descriptor("beta", "missing-lib")],
            &loader(),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(runtime.suite("transform").unwrap().benchmark_names(), vec!["alpha"]);
        assert_eq!(summary.registered.len(), 1);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.attempted(), 2);
        assert!(!summary.all_registered());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_duplicate_names_fail_before_registration() {
        let mut runtime = RecordingRuntime::new();
        let mut diagnostics: Vec<String> = Vec::new();

        let result = register_suite(
            &mut runtime,
            "transform",
            vec![descriptor("x", "alpha-lib"), descriptor("x", "gamma-lib")],
            &loader(),
            &mut diagnostics,
        );

        assert!(matches!(
            result,
            Err(BenchError::HardValidation(
                HardValidationError::DuplicateBackendName { .. }
            ))
        ));
        assert!(runtime.suites().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_suite_name() {
        let result = Suite::new("", Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_suite_can_register_twice() {
        let suite = Suite::new("transform", vec![descriptor("alpha", "alpha-lib")]).unwrap();
        let loader = loader();
        let mut runtime = RecordingRuntime::new();
        let mut diagnostics: Vec<String> = Vec::new();

        suite.register(&mut runtime, &loader, &mut diagnostics);
        suite.register(&mut runtime, &loader, &mut diagnostics);

        assert_eq!(runtime.suites().len(), 2);
        assert_eq!(runtime.benchmark_count(), 2);
    }
}
