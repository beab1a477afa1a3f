//! Build settings derived from an [`Invocation`].

use std::path::{Path, PathBuf};

use crate::core::invocation::{Architecture, BuildMode, Invocation, Linkage};

/// Default base directory for build trees.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Settings handed to CMake for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub architecture: Architecture,
    pub mode: BuildMode,
    pub linkage: Linkage,
    /// Flags passed as both `CMAKE_C_FLAGS` and `CMAKE_CXX_FLAGS`.
    pub compiler_flags: String,
    /// `<base>/<arch>-<mode>`, relative to the source directory.
    pub build_dir: PathBuf,
}

impl BuildInfo {
    /// Derive build settings, rooting the build tree at `base`.
    pub fn derive(invocation: &Invocation, base: &Path) -> Self {
        let mode = invocation.build_mode;
        let build_dir = base.join(format!(
            "{}-{}",
            invocation.architecture,
            mode.as_str().to_lowercase()
        ));

        BuildInfo {
            architecture: invocation.architecture,
            mode,
            linkage: invocation.linkage,
            compiler_flags: invocation.architecture.compiler_flag().to_string(),
            build_dir,
        }
    }

    /// Directory CMake writes executables to.
    pub fn bin_dir(&self) -> PathBuf {
        self.build_dir.join("bin")
    }

    /// Directory CMake writes libraries to.
    pub fn lib_dir(&self) -> PathBuf {
        self.build_dir.join("lib")
    }
}
