//! transbench Core Library
//!
//! Core of a micro-benchmark harness that compares interchangeable
//! source-to-source transformation backends on one fixed workload.
//! Provides backend descriptors, resilient loading, suite registration,
//! the timing-runtime interface, and configuration parsing.

pub mod backend;
pub mod config;
pub mod error;
pub mod loader;
pub mod options;
pub mod resolver;
pub mod runtime;
pub mod suite;
pub mod types;
pub mod workload;

// Re-export commonly used types
pub use backend::{
    command_adapter, BackendDescriptor, BackendSet, Handle, Invocation, InvocationFn,
    TransformRequest, Transformed, Transformer,
};
pub use config::{BackendConfig, Config, ConfigLoader, ResolverConfig, RuntimeSettings};
pub use error::{
    AdaptError, BenchError, BenchResult, HardValidationError, LoadError, LoadFailure,
    ResolveError, TransformError,
};
pub use loader::{ConsoleDiagnostics, DiagnosticSink, LoadResult, LoadedBackend, Loader};
pub use options::{GlobalPassOption, TransformOptions};
pub use resolver::{ChainResolver, CommandResolver, CommandTransformer, Resolver, StaticResolver};
pub use runtime::{RecordedSuite, RecordingRuntime, SuiteScope, TimingRuntime};
pub use suite::{register_suite, Suite, SuiteSummary};
pub use types::{BackendName, Locator, SuiteName};
pub use workload::Workload;
