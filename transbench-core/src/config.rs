// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Describes the suite, the timing settings handed to the runtime, where
//! command backends are looked up, and the ordered backend set.
//! Any invalid field results in a HardValidationError before anything runs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::backend::{command_adapter, BackendDescriptor, BackendSet, DEFAULT_OPTIONS_FLAG};
use crate::error::{BenchError, BenchResult, HardValidationError};
use crate::loader::Loader;
use crate::options::{GlobalPassOption, TransformOptions};
use crate::resolver::CommandResolver;
use crate::suite::Suite;
use crate::types::{BackendName, Locator, SuiteName};
use crate::workload::Workload;

/// Raw backend entry as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawBackendConfig {
    name: String,
    locator: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    options: Option<TransformOptions>,
    #[serde(default = "default_options_flag")]
    options_flag: String,
}

fn default_options_flag() -> String {
    DEFAULT_OPTIONS_FLAG.to_string()
}

/// Raw timing settings.
#[derive(Debug, Deserialize)]
struct RawRuntimeConfig {
    #[serde(default = "default_sample_size")]
    sample_size: usize,
    #[serde(default = "default_measurement_time_ms")]
    measurement_time_ms: u64,
    #[serde(default = "default_warm_up_time_ms")]
    warm_up_time_ms: u64,
}

fn default_sample_size() -> usize {
    100
}

fn default_measurement_time_ms() -> u64 {
    5000
}

fn default_warm_up_time_ms() -> u64 {
    3000
}

impl Default for RawRuntimeConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            measurement_time_ms: default_measurement_time_ms(),
            warm_up_time_ms: default_warm_up_time_ms(),
        }
    }
}

/// Raw resolver settings.
#[derive(Debug, Deserialize)]
struct RawResolverConfig {
    #[serde(default = "default_search_paths")]
    search_paths: Vec<String>,
}

fn default_search_paths() -> Vec<String> {
    vec!["node_modules/.bin".to_string()]
}

impl Default for RawResolverConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_suite")]
    suite: String,
    #[serde(default)]
    runtime: RawRuntimeConfig,
    #[serde(default)]
    resolver: RawResolverConfig,
    #[serde(default)]
    backends: Option<Vec<RawBackendConfig>>,
}

fn default_suite() -> String {
    "transform".to_string()
}

/// Validated backend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub name: BackendName,
    pub locator: Locator,
    pub args: Vec<String>,
    pub options: Option<TransformOptions>,
    pub options_flag: String,
}

impl BackendConfig {
    /// Descriptor driving a command backend with these args and options.
    pub fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor::new(
            self.name.clone(),
            self.locator.clone(),
            command_adapter(
                self.args.clone(),
                self.options.clone(),
                self.options_flag.clone(),
            ),
        )
    }
}

/// Validated timing settings, applied by the runtime binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub sample_size: usize,
    pub measurement_time: Duration,
    pub warm_up_time: Duration,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            measurement_time: Duration::from_millis(default_measurement_time_ms()),
            warm_up_time: Duration::from_millis(default_warm_up_time_ms()),
        }
    }
}

/// Validated resolver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub search_paths: Vec<PathBuf>,
}

impl ResolverConfig {
    pub fn build(&self) -> CommandResolver {
        self.search_paths
            .iter()
            .fold(CommandResolver::new(), |resolver, dir| {
                resolver.with_search_path(dir)
            })
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub suite: SuiteName,
    pub runtime: RuntimeSettings,
    pub resolver: ResolverConfig,
    pub backends: Vec<BackendConfig>,
}

impl Config {
    /// The stock comparison: swc plain, swc with global inlining, and babel
    /// with preset-env plus env inlining.
    pub fn builtin() -> Self {
        Self {
            suite: SuiteName(default_suite()),
            runtime: RuntimeSettings::default(),
            resolver: ResolverConfig {
                search_paths: default_search_paths().into_iter().map(PathBuf::from).collect(),
            },
            backends: builtin_backends(),
        }
    }

    /// Descriptors in declaration order.
    pub fn descriptors(&self) -> Vec<BackendDescriptor> {
        self.backends.iter().map(BackendConfig::descriptor).collect()
    }

    pub fn backend_set(&self) -> Result<BackendSet, HardValidationError> {
        BackendSet::new(self.descriptors())
    }

    pub fn suite(&self) -> BenchResult<Suite> {
        Ok(Suite::from_set(self.suite.clone(), self.backend_set()?))
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.resolver.build())
    }
}

fn builtin_backends() -> Vec<BackendConfig> {
    let filename = Workload::fixed().filename();
    let stdin_args = || vec!["--filename".to_string(), filename.to_string()];

    let babel_args = {
        let mut args = stdin_args();
        args.extend(
            [
                "--presets",
                "@babel/preset-env",
                "--plugins",
                "transform-node-env-inline",
            ]
            .map(String::from),
        );
        args
    };

    vec![
        BackendConfig {
            name: BackendName("swc".to_string()),
            locator: Locator("swc".to_string()),
            args: stdin_args(),
            options: None,
            options_flag: default_options_flag(),
        },
        BackendConfig {
            name: BackendName("swc-optimize".to_string()),
            locator: Locator("swc".to_string()),
            args: stdin_args(),
            options: Some(TransformOptions::with_globals(
                GlobalPassOption::default().env("NODE_ENV", "production"),
            )),
            options_flag: default_options_flag(),
        },
        BackendConfig {
            name: BackendName("babel".to_string()),
            locator: Locator("babel".to_string()),
            args: babel_args,
            options: None,
            options_flag: default_options_flag(),
        },
    ]
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    /// Relative search paths are taken relative to the file's directory.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        let mut config = Self::load_string(&content)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            for dir in &mut config.resolver.search_paths {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }

        Ok(config)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> BenchResult<Config> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig) -> BenchResult<Config> {
        let suite = SuiteName::new(raw.suite)?;
        let runtime = Self::validate_runtime(raw.runtime)?;
        let resolver = Self::validate_resolver(raw.resolver)?;

        let backends = match raw.backends {
            None => builtin_backends(),
            Some(raw_backends) => {
                let mut backends = Vec::with_capacity(raw_backends.len());
                let mut seen_names = HashSet::new();

                for (index, raw_backend) in raw_backends.into_iter().enumerate() {
                    let backend = Self::validate_backend(raw_backend, index)?;

                    if !seen_names.insert(backend.name.clone()) {
                        return Err(HardValidationError::DuplicateBackendName {
                            name: backend.name.to_string(),
                        }
                        .into());
                    }

                    backends.push(backend);
                }

                backends
            }
        };

        Ok(Config {
            suite,
            runtime,
            resolver,
            backends,
        })
    }

    /// Validate timing settings.
    fn validate_runtime(raw: RawRuntimeConfig) -> BenchResult<RuntimeSettings> {
        // Criterion refuses fewer than 10 samples
        const MIN_SAMPLES: usize = 10;
        const MAX_SAMPLES: usize = 10_000;
        const MAX_TIME_MS: u64 = 600_000;

        if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&raw.sample_size) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "sample_size",
                value: raw.sample_size.to_string(),
                reason: format!("Must be between {} and {}", MIN_SAMPLES, MAX_SAMPLES),
            }
            .into());
        }

        for (field, value) in [
            ("measurement_time_ms", raw.measurement_time_ms),
            ("warm_up_time_ms", raw.warm_up_time_ms),
        ] {
            if value == 0 || value > MAX_TIME_MS {
                return Err(HardValidationError::InvalidFieldValue {
                    field,
                    value: value.to_string(),
                    reason: format!("Must be between 1 and {}ms", MAX_TIME_MS),
                }
                .into());
            }
        }

        Ok(RuntimeSettings {
            sample_size: raw.sample_size,
            measurement_time: Duration::from_millis(raw.measurement_time_ms),
            warm_up_time: Duration::from_millis(raw.warm_up_time_ms),
        })
    }

    fn validate_resolver(raw: RawResolverConfig) -> BenchResult<ResolverConfig> {
        if raw.search_paths.iter().any(|p| p.trim().is_empty()) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "search_paths",
                value: String::new(),
                reason: "Search paths cannot be blank".to_string(),
            }
            .into());
        }

        Ok(ResolverConfig {
            search_paths: raw.search_paths.into_iter().map(PathBuf::from).collect(),
        })
    }

    /// Validate a single backend entry.
    fn validate_backend(raw: RawBackendConfig, index: usize) -> BenchResult<BackendConfig> {
        let context = format!("backend at index {}", index);

        let name = BackendName::new(raw.name)?;
        let locator = Locator::new(raw.locator)?;

        if raw.options.is_some() && raw.options_flag.trim().is_empty() {
            return Err(HardValidationError::MissingRequiredField {
                field: "options_flag",
                context,
            }
            .into());
        }

        Ok(BackendConfig {
            name,
            locator,
            args: raw.args,
            options: raw.options,
            options_flag: raw.options_flag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Syntax;

    const VALID_CONFIG: &str = r#"
suite: transform
runtime:
  sample_size: 50
  measurement_time_ms: 2000
  warm_up_time_ms: 500
resolver:
  search_paths:
    - node_modules/.bin
backends:
  - name: swc
    locator: swc
    args: ["--filename", "input.js"]
  - name: swc-ts
    locator: swc
    args: ["--filename", "input.js"]
    options:
      jsc:
        parser:
          syntax: typescript
  - name: esbuild
    locator: esbuild
    args: ["--loader=js"]
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.suite.as_str(), "transform");
        assert_eq!(config.runtime.sample_size, 50);
        assert_eq!(config.runtime.measurement_time, Duration::from_secs(2));
        assert_eq!(config.backends.len(), 3);
        assert_eq!(config.backends[2].name.as_str(), "esbuild");
        assert_eq!(
            config.backends[1].options.as_ref().unwrap().jsc.parser.syntax,
            Syntax::Typescript
        );
        assert_eq!(config.backends[1].options_flag, "--config-file");
    }

    #[test]
    fn test_missing_backends_uses_builtin() {
        let config = ConfigLoader::load_string("suite: transform\n").unwrap();
        let names: Vec<&str> = config.backends.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["swc", "swc-optimize", "babel"]);
    }

    #[test]
    fn test_empty_backends_is_legal() {
        let config = ConfigLoader::load_string("backends: []\n").unwrap();
        assert!(config.backends.is_empty());
        assert!(config.suite().unwrap().backends().is_empty());
    }

    #[test]
    fn test_duplicate_names() {
        let yaml = r#"
backends:
  - name: x
    locator: alpha-lib
  - name: x
    locator: beta-lib
"#;
        let result = ConfigLoader::load_string(yaml);
        match result {
            Err(BenchError::HardValidation(HardValidationError::DuplicateBackendName { name })) => {
                assert_eq!(name, "x")
            }
            other => panic!("expected duplicate name error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_backend_name() {
        let yaml = r#"
backends:
  - name: "swc optimize"
    locator: swc
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_blank_locator() {
        let yaml = r#"
backends:
  - name: swc
    locator: "  "
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_sample_size_too_small() {
        let yaml = r#"
runtime:
  sample_size: 5
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_zero_measurement_time() {
        let yaml = r#"
runtime:
  measurement_time_ms: 0
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_options_require_flag() {
        let yaml = r#"
backends:
  - name: swc
    locator: swc
    options_flag: ""
    options:
      jsc: {}
"#;
        let result = ConfigLoader::load_string(yaml);
        assert!(matches!(
            result,
            Err(BenchError::HardValidation(
                HardValidationError::MissingRequiredField { field: "options_flag", .. }
            ))
        ));
    }

    #[test]
    fn test_defaults_applied() {
        let config = ConfigLoader::load_string("{}").unwrap();
        assert_eq!(config.suite.as_str(), "transform");
        assert_eq!(config.runtime, RuntimeSettings::default());
        assert_eq!(
            config.resolver.search_paths,
            vec![PathBuf::from("node_modules/.bin")]
        );
    }

    #[test]
    fn test_builtin_swc_optimize_inlines_node_env() {
        let config = Config::builtin();
        let optimize = config
            .backends
            .iter()
            .find(|b| b.name.as_str() == "swc-optimize")
            .unwrap();

        let globals = optimize
            .options
            .as_ref()
            .and_then(|o| o.jsc.transform.optimizer.as_ref())
            .and_then(|o| o.globals.as_ref())
            .unwrap();
        assert_eq!(globals.inline_map()["process.env.NODE_ENV"], "'production'");
    }

    #[test]
    fn test_builtin_backend_set_is_valid() {
        let set = Config::builtin().backend_set().unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_load_file_resolves_search_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("transbench.yaml");
        std::fs::write(&path, "resolver:\n  search_paths: [tools/bin, /opt/bin]\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.resolver.search_paths[0], dir.path().join("tools/bin"));
        assert_eq!(config.resolver.search_paths[1], PathBuf::from("/opt/bin"));
    }

    #[test]
    fn test_load_file_missing() {
        let result = ConfigLoader::load_file("/nonexistent/transbench.yaml");
        assert!(matches!(result, Err(BenchError::ConfigNotFound { .. })));
    }
}
