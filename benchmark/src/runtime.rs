// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Criterion as the timing runtime.
//!
//! Suites become benchmark groups and each registered invocation becomes a
//! `bench_function` whose body runs the invocation once per iteration.
//! Warm-up, sampling, statistics and reporting stay with criterion.

use std::hint::black_box;

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, Throughput};
use transbench_core::{InvocationFn, RuntimeSettings, SuiteScope, TimingRuntime};

/// Binds the registrar to a `Criterion` instance.
pub struct CriterionRuntime<'c> {
    criterion: &'c mut Criterion,
    settings: RuntimeSettings,
    throughput: Option<Throughput>,
}

impl<'c> CriterionRuntime<'c> {
    pub fn new(criterion: &'c mut Criterion, settings: RuntimeSettings) -> Self {
        Self {
            criterion,
            settings,
            throughput: None,
        }
    }

    /// Report throughput for every group, typically the workload size in bytes.
    pub fn throughput(mut self, throughput: Throughput) -> Self {
        self.throughput = Some(throughput);
        self
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }
}

impl TimingRuntime for CriterionRuntime<'_> {
    fn declare_suite(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn SuiteScope)) {
        let mut group = self.criterion.benchmark_group(name);
        group
            .sample_size(self.settings.sample_size)
            .measurement_time(self.settings.measurement_time)
            .warm_up_time(self.settings.warm_up_time);

        if let Some(throughput) = &self.throughput {
            group.throughput(throughput.clone());
        }

        let mut scope = GroupScope { group };
        body(&mut scope);
        scope.group.finish();
    }
}

struct GroupScope<'a> {
    group: BenchmarkGroup<'a, WallTime>,
}

impl SuiteScope for GroupScope<'_> {
    fn declare_benchmark(&mut self, name: &str, invocation: InvocationFn) {
        let label = name.to_string();
        self.group.bench_function(name, move |b| {
            b.iter(|| match invocation() {
                Ok(transformed) => black_box(transformed),
                Err(e) => panic!("backend '{}' failed: {}", label, e),
            })
        });
    }
}
