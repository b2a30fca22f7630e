//! Custom error types for transbench.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::types::{BackendName, Locator};

/// Top-level error type for harness construction.
/// Resolution failures never surface here; they are contained by the loader.
#[derive(Debug, Error)]
pub enum BenchError {
    // =========================================================================
    // Definition Errors - Fail-Fast on Invalid Suites and Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors are harness-authoring bugs.
/// They abort the suite before anything is registered.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Missing required field: {field} in {context}")]
    MissingRequiredField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Duplicate backend name: {name}")]
    DuplicateBackendName { name: String },
}

/// Failure to turn a locator into a usable dependency handle.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no backend found for locator '{locator}'")]
    NotFound { locator: Locator },

    #[error("{path} is not executable")]
    NotExecutable { path: PathBuf },

    #[error("lookup of '{locator}' failed: {reason}")]
    Lookup { locator: Locator, reason: String },
}

/// Failure while an adapter builds its invocation from a resolved handle.
#[derive(Debug, Error)]
pub enum AdaptError {
    #[error("failed to prepare backend options: {reason}")]
    Prepare { reason: String },

    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Failure raised by a candidate while transforming the workload.
/// Only the timing runtime ever observes these.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error talking to {program}: {source}")]
    Io {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("transform failed: {message}")]
    Backend { message: String },
}

/// Why a single backend could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Adapt(#[from] AdaptError),

    #[error("panicked while loading: {message}")]
    Panicked { message: String },
}

/// A contained, per-backend load failure.
/// Rendered as the one-line operator diagnostic.
#[derive(Debug, Error)]
#[error("Cannot load {locator} for backend '{backend}': {error}")]
pub struct LoadFailure {
    pub backend: BackendName,
    pub locator: Locator,
    #[source]
    pub error: LoadError,
}

/// Result type alias using BenchError.
pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_validation_error_display() {
        let err = HardValidationError::DuplicateBackendName {
            name: "swc".to_string(),
        };
        assert!(err.to_string().contains("swc"));
    }

    #[test]
    fn test_error_chain() {
        let validation_err = HardValidationError::MissingRequiredField {
            field: "options_flag",
            context: "backend 'swc'".to_string(),
        };
        let bench_err: BenchError = validation_err.into();
        assert!(matches!(bench_err, BenchError::HardValidation(_)));
    }

    #[test]
    fn test_load_failure_names_backend_and_locator() {
        let locator = Locator::new("missing-lib").unwrap();
        let failure = LoadFailure {
            backend: BackendName::new("beta").unwrap(),
            locator: locator.clone(),
            error: ResolveError::NotFound { locator }.into(),
        };

        let line = failure.to_string();
        assert!(line.contains("beta"));
        assert!(line.contains("missing-lib"));
        assert!(!line.contains('\n'));
    }
}
