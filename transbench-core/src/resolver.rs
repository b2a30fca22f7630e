// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Dependency resolvers: locator string in, usable handle out.
//!
//! Resolution is synchronous and reports an unsatisfiable locator as a
//! `ResolveError`, never by aborting the process.

use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use crate::backend::{Handle, TransformRequest, Transformed, Transformer};
use crate::error::{ResolveError, TransformError};
use crate::types::Locator;

/// Bytes of stderr kept when a command fails.
const STDERR_TAIL: usize = 512;

/// Resolves a locator to a dependency handle.
pub trait Resolver {
    fn resolve(&self, locator: &Locator) -> Result<Handle, ResolveError>;
}

/// Resolves locators to executables on disk.
///
/// A locator containing a path separator is taken as a path. Anything else
/// is looked up in the configured search paths first, then `PATH`.
#[derive(Debug, Clone, Default)]
pub struct CommandResolver {
    search_paths: Vec<PathBuf>,
}

impl CommandResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory searched before `PATH`, e.g. `node_modules/.bin`.
    pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn locate(&self, locator: &Locator) -> Result<PathBuf, ResolveError> {
        let raw = locator.as_str();

        if raw.contains('/') || raw.contains(std::path::MAIN_SEPARATOR) {
            return check_executable(Path::new(raw), locator);
        }

        let existing: Vec<&PathBuf> = self.search_paths.iter().filter(|p| p.is_dir()).collect();
        if !existing.is_empty() {
            let joined = std::env::join_paths(existing).map_err(|e| ResolveError::Lookup {
                locator: locator.clone(),
                reason: e.to_string(),
            })?;
            let cwd = std::env::current_dir().map_err(|e| ResolveError::Lookup {
                locator: locator.clone(),
                reason: e.to_string(),
            })?;

            if let Ok(path) = which::which_in(raw, Some(joined), cwd) {
                return Ok(path);
            }
        }

        which::which(raw).map_err(|e| match e {
            which::Error::CannotFindBinaryPath => ResolveError::NotFound {
                locator: locator.clone(),
            },
            other => ResolveError::Lookup {
                locator: locator.clone(),
                reason: other.to_string(),
            },
        })
    }
}

impl Resolver for CommandResolver {
    fn resolve(&self, locator: &Locator) -> Result<Handle, ResolveError> {
        let program = self.locate(locator)?;
        tracing::debug!(locator = %locator, program = %program.display(), "Located command backend");
        Ok(Arc::new(CommandTransformer::new(program)))
    }
}

fn check_executable(path: &Path, locator: &Locator) -> Result<PathBuf, ResolveError> {
    if !path.is_file() {
        return Err(ResolveError::NotFound {
            locator: locator.clone(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = path.metadata() {
            if metadata.permissions().mode() & 0o111 == 0 {
                return Err(ResolveError::NotExecutable {
                    path: path.to_path_buf(),
                });
            }
        }
    }

    Ok(path.to_path_buf())
}

/// Runs an external program once per call.
///
/// The source goes to stdin, the output is whatever the program writes to
/// stdout. A fresh process per call means calls share no state.
#[derive(Debug, Clone)]
pub struct CommandTransformer {
    program: PathBuf,
}

impl CommandTransformer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Transformer for CommandTransformer {
    fn transform(
        &self,
        source: &str,
        request: &TransformRequest,
    ) -> Result<Transformed, TransformError> {
        let mut child = Command::new(&self.program)
            .args(&request.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TransformError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take();

        // Feed stdin from a second thread so a chatty program cannot fill
        // its stdout pipe while we are still writing.
        let (write_result, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (write_result, output)
        });

        let output = output.map_err(|e| TransformError::Io {
            program: self.program.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(TransformError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: stderr_tail(&output.stderr),
            });
        }

        match write_result {
            Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(TransformError::Io {
                program: self.program.clone(),
                source: e,
            }),
            _ => Ok(Transformed {
                output: output.stdout,
            }),
        }
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

/// In-process table of handles keyed by locator.
#[derive(Default, Clone)]
pub struct StaticResolver {
    handles: HashMap<String, Handle>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle under a locator, replacing any previous one.
    pub fn insert(&mut self, locator: impl Into<String>, handle: Handle) {
        self.handles.insert(locator.into(), handle);
    }

    pub fn with(mut self, locator: impl Into<String>, handle: Handle) -> Self {
        self.insert(locator, handle);
        self
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, locator: &Locator) -> Result<Handle, ResolveError> {
        self.handles
            .get(locator.as_str())
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                locator: locator.clone(),
            })
    }
}

/// Tries each resolver in order; the first success wins.
#[derive(Default)]
pub struct ChainResolver {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ChainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<R: Resolver + 'static>(mut self, resolver: R) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }
}

impl Resolver for ChainResolver {
    fn resolve(&self, locator: &Locator) -> Result<Handle, ResolveError> {
        let mut last_error = ResolveError::NotFound {
            locator: locator.clone(),
        };

        for resolver in &self.resolvers {
            match resolver.resolve(locator) {
                Ok(handle) => return Ok(handle),
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}
