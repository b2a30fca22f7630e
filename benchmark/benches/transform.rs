// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Transformation backend comparison.
//!
//! Every configured backend transforms the same fixed workload. Backends
//! that are not installed are reported and skipped; the rest are timed.
//!
//! Set `TRANSBENCH_CONFIG` to a YAML file to replace the built-in set.

use criterion::{criterion_group, criterion_main, Criterion};
use transbench_benchmark::{config_from_env, init_tracing, register_configured_suite};

fn bench_transform(c: &mut Criterion) {
    init_tracing();

    let config = match config_from_env() {
        Ok(config) => config,
        Err(e) => panic!("invalid benchmark configuration: {}", e),
    };

    match register_configured_suite(c, &config) {
        Ok(summary) => {
            if summary.registered.is_empty() {
                eprintln!(
                    "No backends available for suite '{}' ({} skipped)",
                    summary.suite,
                    summary.skipped.len()
                );
            }
        }
        Err(e) => panic!("invalid benchmark suite: {}", e),
    }
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
