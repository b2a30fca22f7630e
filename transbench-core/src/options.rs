// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `.swcrc`-shaped transformation options.
//!
//! Backends that accept a configuration file receive these rendered as JSON.
//! Only the subset the comparison actually exercises is modelled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root of an `.swcrc` file.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default)]
    pub jsc: JscConfig,
}

impl TransformOptions {
    /// Options with the global-inlining optimizer enabled.
    pub fn with_globals(globals: GlobalPassOption) -> Self {
        Self {
            jsc: JscConfig {
                transform: TransformConfig {
                    optimizer: Some(OptimizerConfig {
                        globals: Some(globals),
                    }),
                },
                ..JscConfig::default()
            },
        }
    }

    /// The global-inlining pass, when enabled.
    pub fn globals(&self) -> Option<&GlobalPassOption> {
        self.jsc
            .transform
            .optimizer
            .as_ref()
            .and_then(|optimizer| optimizer.globals.as_ref())
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct JscConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub transform: TransformConfig,
}

/// Source dialect accepted by the parser.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Ecmascript,
    Typescript,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub syntax: Syntax,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub jsx: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tsx: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<GlobalPassOption>,
}

/// Identifiers replaced at compile time.
///
/// `vars` map an identifier to expression text. `envs` map an environment
/// variable name to a string value and are inlined as `process.env.NAME`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPassOption {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
}

impl GlobalPassOption {
    /// Inline `process.env.NAME` as the given string value.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.insert(name.into(), value.into());
        self
    }

    /// Inline an identifier as raw expression text.
    pub fn var(mut self, name: impl Into<String>, expr: impl Into<String>) -> Self {
        self.vars.insert(name.into(), expr.into());
        self
    }

    /// Replacement table: identifier -> expression text.
    ///
    /// Env values become single-quoted string literals; vars are verbatim.
    pub fn inline_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        for (name, expr) in &self.vars {
            map.insert(name.clone(), expr.clone());
        }

        for (name, value) in &self.envs {
            map.insert(format!("process.env.{}", name), format!("'{}'", value));
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_ecmascript_parser() {
        let json = TransformOptions::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["jsc"]["parser"]["syntax"], "ecmascript");
        assert!(value["jsc"]["transform"].get("optimizer").is_none());
    }

    #[test]
    fn test_globals_accessor() {
        assert!(TransformOptions::default().globals().is_none());

        let options =
            TransformOptions::with_globals(GlobalPassOption::default().var("__DEV__", "false"));
        let globals = options.globals().unwrap();
        assert_eq!(globals.inline_map()["__DEV__"], "false");
    }

    #[test]
    fn test_inline_map_quotes_envs_only() {
        let globals = GlobalPassOption::default()
            .env("NODE_ENV", "production")
            .var("__DEBUG__", "false");

        let map = globals.inline_map();
        assert_eq!(map["process.env.NODE_ENV"], "'production'");
        assert_eq!(map["__DEBUG__"], "false");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_with_globals_round_trips_through_yaml() {
        let options =
            TransformOptions::with_globals(GlobalPassOption::default().env("NODE_ENV", "production"));

        let yaml = serde_yaml::to_string(&options).unwrap();
        let parsed: TransformOptions = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_partial_swcrc_parses() {
        let parsed: TransformOptions = serde_json::from_str(
            r#"{ "jsc": { "parser": { "syntax": "typescript", "tsx": true } } }"#,
        )
        .unwrap();
        assert_eq!(parsed.jsc.parser.syntax, Syntax::Typescript);
        assert!(parsed.jsc.parser.tsx);
        assert!(parsed.jsc.transform.optimizer.is_none());
    }
}
