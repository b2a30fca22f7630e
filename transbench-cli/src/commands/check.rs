// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `transbench check` command - Dry-run the registration sweep.
//!
//! Registers the suite against a recording runtime instead of criterion, so
//! operators can see which backends load without timing anything.

use transbench_core::RecordingRuntime;

use super::load_config;

pub fn execute(
    config_path: Option<&str>,
    invoke: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let suite = config.suite()?;
    let loader = config.loader();

    let mut runtime = RecordingRuntime::new();
    let mut diagnostics: Vec<String> = Vec::new();
    let summary = suite.register(&mut runtime, &loader, &mut diagnostics);

    println!("Suite: {}", summary.suite);
    println!();

    for name in &summary.registered {
        println!("  ✓ {}", name);
    }
    for line in &diagnostics {
        println!("  ✗ {}", line);
    }

    let mut failed_invocations = 0usize;
    if invoke {
        println!();
        println!("Invoking each backend once:");
        for recorded in runtime.suites() {
            for bench in &recorded.benchmarks {
                match (bench.invocation)() {
                    Ok(out) => println!("  ✓ {} ({} bytes out)", bench.name, out.output.len()),
                    Err(e) => {
                        failed_invocations += 1;
                        println!("  ✗ {} - {}", bench.name, e);
                    }
                }
            }
        }
    }

    println!();
    println!(
        "{} registered, {} skipped",
        summary.registered.len(),
        summary.skipped.len()
    );

    if strict && (!summary.all_registered() || failed_invocations > 0) {
        eprintln!("✗ Not every backend is usable");
        std::process::exit(1);
    }

    Ok(())
}
