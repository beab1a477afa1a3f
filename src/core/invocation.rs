//! Positional choices that select what gets built.

use std::fmt;

/// Target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Architecture {
    /// 64-bit (`x64`)
    #[default]
    X64,
    /// 32-bit (`x86`)
    X86,
}

impl Architecture {
    /// Token accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X64 => "x64",
            Architecture::X86 => "x86",
        }
    }

    /// Compiler flag selecting the pointer width.
    pub fn compiler_flag(&self) -> &'static str {
        match self {
            Architecture::X64 => "-m64",
            Architecture::X86 => "-m32",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Architecture {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x64" => Ok(Architecture::X64),
            "x86" => Ok(Architecture::X86),
            _ => Err(ChoiceParseError::new("architecture", s, &["x64", "x86"])),
        }
    }
}

/// CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    /// Debug build with symbols (`d`)
    #[default]
    Debug,
    /// Optimized release build (`r`)
    Release,
}

impl BuildMode {
    /// Value passed as `CMAKE_BUILD_TYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildMode {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(BuildMode::Debug),
            "r" => Ok(BuildMode::Release),
            _ => Err(ChoiceParseError::new("build type", s, &["d", "r"])),
        }
    }
}

/// Library linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Linkage {
    /// Static libraries (`st`)
    #[default]
    Static,
    /// Shared libraries / DLLs (`sh`)
    Shared,
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Static => "Static",
            Linkage::Shared => "Shared",
        }
    }

    /// Value of the `BUILD_SHARED_LIBS` cache variable.
    pub fn shared_libs_switch(&self) -> &'static str {
        match self {
            Linkage::Static => "OFF",
            Linkage::Shared => "ON",
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Linkage {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "st" => Ok(Linkage::Static),
            "sh" => Ok(Linkage::Shared),
            _ => Err(ChoiceParseError::new("library type", s, &["st", "sh"])),
        }
    }
}

/// Error returned when a positional token is outside its choice set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceParseError {
    kind: &'static str,
    value: String,
    choices: &'static [&'static str],
}

impl ChoiceParseError {
    fn new(kind: &'static str, value: &str, choices: &'static [&'static str]) -> Self {
        ChoiceParseError {
            kind,
            value: value.to_string(),
            choices,
        }
    }
}

impl fmt::Display for ChoiceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}', valid values: {}",
            self.kind,
            self.value,
            self.choices.join(", ")
        )
    }
}

impl std::error::Error for ChoiceParseError {}

/// The resolved command-line choices for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub architecture: Architecture,
    pub build_mode: BuildMode,
    pub linkage: Linkage,
    /// Explicit executable name; `None` means "use the directory name".
    pub program_name: Option<String>,
}

impl Invocation {
    /// Create an invocation, treating an empty program name as absent.
    pub fn new(
        architecture: Architecture,
        build_mode: BuildMode,
        linkage: Linkage,
        program_name: Option<String>,
    ) -> Self {
        Invocation {
            architecture,
            build_mode,
            linkage,
            program_name: program_name.filter(|name| !name.is_empty()),
        }
    }

    /// Parse the raw positional tokens, applying defaults for missing ones.
    pub fn from_tokens(
        architecture: Option<&str>,
        build_type: Option<&str>,
        library_type: Option<&str>,
        program_name: Option<&str>,
    ) -> Result<Self, ChoiceParseError> {
        let architecture = architecture.map(str::parse).transpose()?.unwrap_or_default();
        let build_mode = build_type.map(str::parse).transpose()?.unwrap_or_default();
        let linkage = library_type.map(str::parse).transpose()?.unwrap_or_default();

        Ok(Invocation::new(
            architecture,
            build_mode,
            linkage,
            program_name.map(str::to_string),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let inv = Invocation::from_tokens(None, None, None, None).unwrap();
        assert_eq!(inv.architecture, Architecture::X64);
        assert_eq!(inv.build_mode, BuildMode::Debug);
        assert_eq!(inv.linkage, Linkage::Static);
        assert_eq!(inv.program_name, None);
    }

    #[test]
    fn test_all_tokens() {
        let inv = Invocation::from_tokens(Some("x86"), Some("r"), Some("sh"), Some("myapp")).unwrap();
        assert_eq!(inv.architecture, Architecture::X86);
        assert_eq!(inv.build_mode, BuildMode::Release);
        assert_eq!(inv.linkage, Linkage::Shared);
        assert_eq!(inv.program_name.as_deref(), Some("myapp"));
    }

    #[test]
    fn test_empty_program_name_is_absent() {
        let inv = Invocation::from_tokens(None, None, None, Some("")).unwrap();
        assert_eq!(inv.program_name, None);
    }

    #[test]
    fn test_invalid_architecture() {
        let err = Invocation::from_tokens(Some("arm"), None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid architecture 'arm', valid values: x64, x86"
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!("X64".parse::<Architecture>().is_err());
        assert!("D".parse::<BuildMode>().is_err());
        assert!("static".parse::<Linkage>().is_err());
    }

    #[test]
    fn test_shared_libs_switch() {
        assert_eq!(Linkage::Static.shared_libs_switch(), "OFF");
        assert_eq!(Linkage::Shared.shared_libs_switch(), "ON");
    }
}
