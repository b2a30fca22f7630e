// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use std::path::Path;

use transbench_core::{BenchResult, Config, ConfigLoader};

pub mod check;
pub mod list;
pub mod run;
pub mod validate;
pub mod workload;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "transbench.yaml";

/// Load the explicit config, else `./transbench.yaml`, else the built-in set.
pub fn load_config(path: Option<&str>) -> BenchResult<Config> {
    match path {
        Some(path) => {
            tracing::debug!(config = %path, "Loading configuration");
            ConfigLoader::load_file(path)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::debug!(config = DEFAULT_CONFIG_FILE, "Loading configuration");
            ConfigLoader::load_file(DEFAULT_CONFIG_FILE)
        }
        None => {
            tracing::debug!("No configuration file, using built-in backends");
            Ok(Config::builtin())
        }
    }
}
