// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Resilient backend loading.
//!
//! Each descriptor is resolved and adapted in isolation. Any failure,
//! including a panic inside a resolver or adapter, is turned into a
//! `LoadFailure` for that descriptor alone. Contained panics are kept off
//! the panic hook so each skipped backend costs exactly one diagnostic line.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use crate::backend::{BackendDescriptor, InvocationFn};
use crate::error::{LoadError, LoadFailure};
use crate::resolver::Resolver;
use crate::types::BackendName;
use crate::workload::Workload;

/// A backend whose invocation is bound to the workload.
pub struct LoadedBackend {
    pub name: BackendName,
    pub invocation: InvocationFn,
}

impl fmt::Debug for LoadedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedBackend")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of loading one descriptor. Consumed immediately by the registrar.
pub type LoadResult = Result<LoadedBackend, LoadFailure>;

/// Receives one diagnostic per backend that could not be loaded.
pub trait DiagnosticSink {
    fn report(&mut self, failure: &LoadFailure);
}

/// Writes each diagnostic as a single line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDiagnostics;

impl DiagnosticSink for ConsoleDiagnostics {
    fn report(&mut self, failure: &LoadFailure) {
        eprintln!("{}", failure);
    }
}

/// Collected diagnostic lines, in report order.
impl DiagnosticSink for Vec<String> {
    fn report(&mut self, failure: &LoadFailure) {
        self.push(failure.to_string());
    }
}

/// Resolves descriptors and binds their invocations to the workload.
pub struct Loader {
    resolver: Box<dyn Resolver>,
    workload: &'static Workload,
}

impl Loader {
    pub fn new<R: Resolver + 'static>(resolver: R) -> Self {
        Self {
            resolver: Box::new(resolver),
            workload: Workload::fixed(),
        }
    }

    pub fn workload(&self) -> &'static Workload {
        self.workload
    }

    /// Resolve one descriptor. Never panics and never returns early for
    /// other descriptors; failures are returned as values.
    pub fn resolve(&self, descriptor: &BackendDescriptor) -> LoadResult {
        let attempt = quietly(|| {
            panic::catch_unwind(AssertUnwindSafe(|| -> Result<_, LoadError> {
                let handle = self.resolver.resolve(descriptor.locator())?;
                Ok(descriptor.adapt(handle)?)
            }))
        });

        let error = match attempt {
            Ok(Ok(invocation)) => {
                tracing::debug!(
                    backend = %descriptor.name(),
                    locator = %descriptor.locator(),
                    "Loaded backend"
                );
                let source = self.workload.as_str();
                return Ok(LoadedBackend {
                    name: descriptor.name().clone(),
                    invocation: Box::new(move || invocation(source)),
                });
            }
            Ok(Err(error)) => error,
            Err(payload) => LoadError::Panicked {
                message: panic_message(payload.as_ref()),
            },
        };

        tracing::warn!(
            backend = %descriptor.name(),
            locator = %descriptor.locator(),
            error = %error,
            "Backend could not be loaded"
        );

        Err(LoadFailure {
            backend: descriptor.name().clone(),
            locator: descriptor.locator().clone(),
            error,
        })
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loader")
            .field("workload", &self.workload.name())
            .finish_non_exhaustive()
    }
}

thread_local! {
    static LOADING: Cell<bool> = const { Cell::new(false) };
}

static MUTE_WHILE_LOADING: Once = Once::new();

/// Run `f` with the panic hook silenced on this thread only. Panics on other
/// threads, and outside `f`, still reach the previously installed hook.
fn quietly<T>(f: impl FnOnce() -> T) -> T {
    MUTE_WHILE_LOADING.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !LOADING.with(Cell::get) {
                previous(info);
            }
        }));
    });

    let outer = LOADING.with(|flag| flag.replace(true));
    let result = f();
    LOADING.with(|flag| flag.set(outer));
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
