//! High-level operations.

pub mod cmake_run;

pub use cmake_run::{
    cmake_run, compile, configure, execute_binary, locate_executable, validate_environment,
    PipelineError, RunOptions, RunOutcome,
};
