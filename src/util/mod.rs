//! Shared utilities

pub mod config;
pub mod context;
pub mod process;
pub mod shell;

pub use config::Config;
pub use context::GlobalContext;
pub use process::{ProcessBuilder, ProcessRunner, ProcessStatus, SystemRunner};
pub use shell::{ColorChoice, Shell, Status, Verbosity};
