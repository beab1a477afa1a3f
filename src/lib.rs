//! cmrun - configure, build and run a CMake project in one step
//!
//! This crate provides the library behind the `cmrun` binary: argument
//! resolution, build settings, CMake command composition and the
//! configure → compile → run pipeline.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for cmrun unit tests.
///
/// Only compiled for tests. Provides a scripted [`util::process::ProcessRunner`]
/// that records every command instead of spawning it.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    build_info::BuildInfo,
    host::{GeneratorTable, HostOs},
    invocation::{Architecture, BuildMode, Invocation, Linkage},
};

pub use ops::{cmake_run, PipelineError, RunOptions, RunOutcome};
pub use util::context::GlobalContext;
