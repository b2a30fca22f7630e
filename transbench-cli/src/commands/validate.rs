// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `transbench validate` command - Validate configuration file.

use transbench_core::ConfigLoader;

pub fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            println!("✓ Configuration is valid");
            println!();
            println!("Runtime Settings:");
            println!("  Suite:              {}", config.suite);
            println!("  Sample Size:        {}", config.runtime.sample_size);
            println!(
                "  Measurement Time:   {}ms",
                config.runtime.measurement_time.as_millis()
            );
            println!(
                "  Warm-up Time:       {}ms",
                config.runtime.warm_up_time.as_millis()
            );
            println!("  Search Paths:");
            for dir in &config.resolver.search_paths {
                println!("    - {}", dir.display());
            }
            println!();
            println!("Backends ({}):", config.backends.len());
            for backend in &config.backends {
                println!(
                    "  - {} (locator: {}, args: {}, options: {})",
                    backend.name,
                    backend.locator,
                    backend.args.len(),
                    if backend.options.is_some() { "yes" } else { "no" }
                );
                if let Some(globals) = backend.options.as_ref().and_then(|o| o.globals()) {
                    for (ident, replacement) in globals.inline_map() {
                        println!("      inline {} -> {}", ident, replacement);
                    }
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
