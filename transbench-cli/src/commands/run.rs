// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `transbench run` command - Time the suite with criterion.

use std::time::Duration;

use criterion::Criterion;
use regex::Regex;
use transbench_benchmark::register_configured_suite;
use transbench_core::RuntimeSettings;

use super::load_config;

/// Sampling used by `--quick`.
const QUICK_SETTINGS: RuntimeSettings = RuntimeSettings {
    sample_size: 10,
    measurement_time: Duration::from_secs(1),
    warm_up_time: Duration::from_millis(500),
};

pub fn execute(
    config_path: Option<&str>,
    filter: Option<&str>,
    quick: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match filter.map(parse_filter).transpose() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("✗ Invalid filter: {}", e);
            std::process::exit(1);
        }
    };

    let mut config = load_config(config_path)?;
    if quick {
        config.runtime = QUICK_SETTINGS;
    }

    tracing::info!(
        suite = %config.suite,
        backends = config.backends.len(),
        sample_size = config.runtime.sample_size,
        "Running suite"
    );

    let mut criterion = Criterion::default();
    if let Some(filter) = filter {
        criterion = criterion.with_filter(filter.as_str());
    }

    let summary = register_configured_suite(&mut criterion, &config)?;
    criterion.final_summary();

    println!();
    println!(
        "{} backend(s) timed, {} skipped",
        summary.registered.len(),
        summary.skipped.len()
    );

    Ok(())
}

/// Criterion compiles the filter itself and panics on a bad pattern, so
/// reject it here first.
fn parse_filter(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_accepts_backend_ids() {
        let filter = parse_filter("transform/swc").unwrap();
        assert!(filter.is_match("transform/swc-optimize"));
        assert!(!filter.is_match("transform/babel"));
    }

    #[test]
    fn test_parse_filter_rejects_malformed_pattern() {
        let err = parse_filter("[").unwrap_err();
        assert!(err.to_string().contains("unclosed character class"));
    }

    #[test]
    fn test_quick_settings_are_within_config_bounds() {
        assert!((10..=10_000).contains(&QUICK_SETTINGS.sample_size));
        assert!(QUICK_SETTINGS.warm_up_time < QUICK_SETTINGS.measurement_time);
    }
}
