// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! transbench Benchmarking Runtime
//!
//! Binds the transbench registrar to criterion, which owns every timing
//! concern: warm-up, sampling, statistics, and reports.
//!
//! # Suites
//!
//! - **transform**: each configured backend transforms the fixed workload
//!   once per iteration.

pub mod runtime;

use std::path::PathBuf;

use criterion::{Criterion, Throughput};
use tracing_subscriber::EnvFilter;
use transbench_core::{BenchResult, Config, ConfigLoader, ConsoleDiagnostics, SuiteSummary};

pub use runtime::CriterionRuntime;

/// Environment variable naming a config file for the bench target.
pub const CONFIG_ENV: &str = "TRANSBENCH_CONFIG";

/// Config from `TRANSBENCH_CONFIG` when set, else the built-in comparison.
pub fn config_from_env() -> BenchResult<Config> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => ConfigLoader::load_file(PathBuf::from(path)),
        None => Ok(Config::builtin()),
    }
}

/// Install a stderr subscriber honouring `RUST_LOG`, defaulting to `warn`.
/// A subscriber installed earlier wins.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Register the configured suite with criterion.
///
/// Backends that cannot be loaded are reported on stderr and skipped.
pub fn register_configured_suite(
    criterion: &mut Criterion,
    config: &Config,
) -> BenchResult<SuiteSummary> {
    let suite = config.suite()?;
    let loader = config.loader();

    let mut runtime = CriterionRuntime::new(criterion, config.runtime)
        .throughput(Throughput::Bytes(loader.workload().len() as u64));

    Ok(suite.register(&mut runtime, &loader, &mut ConsoleDiagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use transbench_core::ConfigLoader;

    #[test]
    fn test_register_configured_suite_with_missing_backends() {
        let config = ConfigLoader::load_string(
            r#"
suite: lib_test
runtime:
  sample_size: 10
  measurement_time_ms: 20
  warm_up_time_ms: 5
resolver:
  search_paths: []
backends:
  - name: absent
    locator: transbench-no-such-transpiler
"#,
        )
        .unwrap();

        let mut criterion = Criterion::default().without_plots();
        let summary = register_configured_suite(&mut criterion, &config).unwrap();

        assert!(summary.registered.is_empty());
        assert_eq!(summary.skipped.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_register_configured_suite_runs_command_backend() {
        let config = ConfigLoader::load_string(
            r#"
suite: lib_test_cat
runtime:
  sample_size: 10
  measurement_time_ms: 50
  warm_up_time_ms: 5
resolver:
  search_paths: []
backends:
  - name: cat
    locator: cat
"#,
        )
        .unwrap();

        let mut criterion = Criterion::default().without_plots();
        let summary = register_configured_suite(&mut criterion, &config).unwrap();

        assert_eq!(summary.registered.len(), 1);
        assert!(summary.all_registered());
    }
}
