//! External build tool adapters.

pub mod cmake;

pub use cmake::CMakeBuilder;
