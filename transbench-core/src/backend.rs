// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Backend descriptors and the adapters that bind them to the workload.
//!
//! A descriptor only names a candidate and says how to call it once its
//! dependency is resolved. Resolution itself belongs to the loader.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tempfile::TempDir;

use crate::error::{AdaptError, HardValidationError, TransformError};
use crate::options::TransformOptions;
use crate::types::{BackendName, Locator};

/// Flag that introduces an options file when none is configured.
pub const DEFAULT_OPTIONS_FLAG: &str = "--config-file";

/// Candidate entry point: source payload plus an options value in,
/// transformed output out.
pub trait Transformer: Send + Sync {
    fn transform(&self, source: &str, request: &TransformRequest)
        -> Result<Transformed, TransformError>;
}

/// A resolved dependency.
pub type Handle = Arc<dyn Transformer>;

/// Backend-specific options passed on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformRequest {
    pub args: Vec<String>,
}

impl TransformRequest {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }
}

/// Opaque backend output. The harness never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    pub output: Vec<u8>,
}

/// What an adapter produces: a call taking the workload source.
pub type Invocation = Box<dyn Fn(&str) -> Result<Transformed, TransformError> + Send>;

/// An invocation bound to the workload, ready for the timing runtime.
pub type InvocationFn = Box<dyn Fn() -> Result<Transformed, TransformError> + Send>;

/// Turns a resolved handle into an invocation. Must not resolve anything itself.
pub type Adapter = Arc<dyn Fn(Handle) -> Result<Invocation, AdaptError> + Send + Sync>;

/// One candidate implementation.
#[derive(Clone)]
pub struct BackendDescriptor {
    name: BackendName,
    locator: Locator,
    adapter: Adapter,
}

impl BackendDescriptor {
    pub fn new<F>(name: BackendName, locator: Locator, adapt: F) -> Self
    where
        F: Fn(Handle) -> Result<Invocation, AdaptError> + Send + Sync + 'static,
    {
        Self {
            name,
            locator,
            adapter: Arc::new(adapt),
        }
    }

    pub fn name(&self) -> &BackendName {
        &self.name
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Run the adapter against a resolved handle.
    pub fn adapt(&self, handle: Handle) -> Result<Invocation, AdaptError> {
        (self.adapter)(handle)
    }
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

/// Ordered set of descriptors with unique names.
#[derive(Debug, Clone, Default)]
pub struct BackendSet {
    descriptors: Vec<BackendDescriptor>,
}

impl BackendSet {
    /// Validate name uniqueness. Fails on the first duplicate.
    pub fn new(descriptors: Vec<BackendDescriptor>) -> Result<Self, HardValidationError> {
        let mut seen = HashSet::with_capacity(descriptors.len());

        for descriptor in &descriptors {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(HardValidationError::DuplicateBackendName {
                    name: descriptor.name.to_string(),
                });
            }
        }

        Ok(Self { descriptors })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Names in declaration order.
    pub fn names(&self) -> Vec<&BackendName> {
        self.descriptors.iter().map(|d| &d.name).collect()
    }
}

impl<'a> IntoIterator for &'a BackendSet {
    type Item = &'a BackendDescriptor;
    type IntoIter = std::slice::Iter<'a, BackendDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// Adapter for command-line transformers.
///
/// When `options` is set, they are written once as JSON into a private
/// temporary directory and `<options_flag> <path>` is appended to `args`.
/// The directory lives as long as the produced invocation.
pub fn command_adapter(
    args: Vec<String>,
    options: Option<TransformOptions>,
    options_flag: String,
) -> impl Fn(Handle) -> Result<Invocation, AdaptError> + Send + Sync + 'static {
    move |handle: Handle| {
        let mut args = args.clone();

        let options_dir = match &options {
            Some(options) => {
                let dir = TempDir::new().map_err(|e| AdaptError::Io {
                    context: "creating options directory",
                    source: e,
                })?;
                let path = dir.path().join(".swcrc");
                let json = options.to_json().map_err(|e| AdaptError::Prepare {
                    reason: e.to_string(),
                })?;
                std::fs::write(&path, json).map_err(|e| AdaptError::Io {
                    context: "writing options file",
                    source: e,
                })?;

                args.push(options_flag.clone());
                args.push(path.to_string_lossy().into_owned());
                Some(dir)
            }
            None => None,
        };

        let request = TransformRequest::new(args);
        let invocation: Invocation = Box::new(move |source: &str| {
            let _keep_alive = &options_dir;
            handle.transform(source, &request)
        });
        Ok(invocation)
    }
}
