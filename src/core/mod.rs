//! Core data structures.
//!
//! - Positional choices (architecture, build mode, linkage)
//! - Build settings derived from them
//! - Host identity and generator selection

pub mod build_info;
pub mod host;
pub mod invocation;

pub use build_info::BuildInfo;
pub use host::{GeneratorTable, HostOs};
pub use invocation::{Architecture, BuildMode, Invocation, Linkage};
