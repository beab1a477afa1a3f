//! Host operating system identity and the CMake generator chosen for it.

use std::collections::HashMap;
use std::fmt;

/// Fallback generator for hosts without an explicit entry.
pub const DEFAULT_GENERATOR: &str = "Unix Makefiles";

/// Operating system the wrapper is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostOs {
    Windows,
    Linux,
    /// macOS
    Darwin,
    /// Any other OS, keyed by its `std::env::consts::OS` name.
    Other(String),
}

impl HostOs {
    /// Detect the host this binary was compiled for.
    pub fn current() -> Self {
        HostOs::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS`-style name to a host.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            "macos" => HostOs::Darwin,
            other => HostOs::Other(other.to_string()),
        }
    }

    /// Suffix appended to executable file names.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            HostOs::Windows => ".exe",
            _ => "",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOs::Windows => f.write_str("windows"),
            HostOs::Linux => f.write_str("linux"),
            HostOs::Darwin => f.write_str("macos"),
            HostOs::Other(name) => f.write_str(name),
        }
    }
}

/// Host → CMake generator mapping.
///
/// Passed explicitly into the pipeline so callers (and tests) decide which
/// host they are generating for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorTable {
    entries: HashMap<HostOs, String>,
    fallback: String,
}

impl GeneratorTable {
    /// Create an empty table that resolves every host to `fallback`.
    pub fn new(fallback: impl Into<String>) -> Self {
        GeneratorTable {
            entries: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Set the generator for a host.
    pub fn with(mut self, host: HostOs, generator: impl Into<String>) -> Self {
        self.insert(host, generator);
        self
    }

    pub fn insert(&mut self, host: HostOs, generator: impl Into<String>) {
        self.entries.insert(host, generator.into());
    }

    pub fn set_fallback(&mut self, generator: impl Into<String>) {
        self.fallback = generator.into();
    }

    /// Generator for `host`, or the fallback if the host has no entry.
    pub fn generator_for(&self, host: &HostOs) -> &str {
        self.entries
            .get(host)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

impl Default for GeneratorTable {
    fn default() -> Self {
        GeneratorTable::new(DEFAULT_GENERATOR)
            .with(HostOs::Windows, "MinGW Makefiles")
            .with(HostOs::Linux, "Unix Makefiles")
            .with(HostOs::Darwin, "Unix Makefiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_name() {
        assert_eq!(HostOs::from_os_name("windows"), HostOs::Windows);
        assert_eq!(HostOs::from_os_name("linux"), HostOs::Linux);
        assert_eq!(HostOs::from_os_name("macos"), HostOs::Darwin);
        assert_eq!(
            HostOs::from_os_name("freebsd"),
            HostOs::Other("freebsd".to_string())
        );
    }

    #[test]
    fn test_exe_suffix() {
        assert_eq!(HostOs::Windows.exe_suffix(), ".exe");
        assert_eq!(HostOs::Linux.exe_suffix(), "");
        assert_eq!(HostOs::Darwin.exe_suffix(), "");
        assert_eq!(HostOs::Other("haiku".into()).exe_suffix(), "");
    }

    #[test]
    fn test_default_generators() {
        let table = GeneratorTable::default();
        assert_eq!(table.generator_for(&HostOs::Windows), "MinGW Makefiles");
        assert_eq!(table.generator_for(&HostOs::Linux), "Unix Makefiles");
        assert_eq!(table.generator_for(&HostOs::Darwin), "Unix Makefiles");
    }

    #[test]
    fn test_unknown_host_uses_fallback() {
        let table = GeneratorTable::default();
        assert_eq!(
            table.generator_for(&HostOs::Other("freebsd".into())),
            DEFAULT_GENERATOR
        );

        let mut table = GeneratorTable::default();
        table.set_fallback("Ninja");
        assert_eq!(table.generator_for(&HostOs::Other("freebsd".into())), "Ninja");
        assert_eq!(table.generator_for(&HostOs::Linux), "Unix Makefiles");
    }

    #[test]
    fn test_override_entry() {
        let table = GeneratorTable::default().with(HostOs::Windows, "Ninja");
        assert_eq!(table.generator_for(&HostOs::Windows), "Ninja");
    }
}
