//! CMake command composition.

use std::path::PathBuf;

use crate::core::build_info::BuildInfo;
use crate::util::context::GlobalContext;
use crate::util::process::ProcessBuilder;

/// Builds the CMake command lines for one build tree.
pub struct CMakeBuilder<'a> {
    ctx: &'a GlobalContext,
    info: &'a BuildInfo,
}

impl<'a> CMakeBuilder<'a> {
    /// Create a new CMake builder.
    pub fn new(ctx: &'a GlobalContext, info: &'a BuildInfo) -> Self {
        CMakeBuilder { ctx, info }
    }

    fn cmake(&self) -> ProcessBuilder {
        ProcessBuilder::new(self.ctx.cmake()).cwd(self.ctx.cwd())
    }

    /// Absolute executable output directory.
    pub fn executable_output_path(&self) -> PathBuf {
        self.ctx.cwd().join(self.info.bin_dir())
    }

    /// Absolute library output directory.
    pub fn library_output_path(&self) -> PathBuf {
        self.ctx.cwd().join(self.info.lib_dir())
    }

    /// `cmake --version`, used to check that CMake is usable at all.
    pub fn version_command(&self) -> ProcessBuilder {
        self.cmake().arg("--version")
    }

    /// Generate build files into the build directory.
    pub fn configure_command(&self) -> ProcessBuilder {
        let flags = &self.info.compiler_flags;

        self.cmake()
            .arg("-B")
            .arg(&self.info.build_dir)
            .arg("-S")
            .arg(".")
            .arg("-G")
            .arg(self.ctx.generator())
            .arg(format!("-DCMAKE_BUILD_TYPE={}", self.info.mode))
            .arg(format!("-DCMAKE_C_FLAGS={}", flags))
            .arg(format!("-DCMAKE_CXX_FLAGS={}", flags))
            .arg(format!(
                "-DEXECUTABLE_OUTPUT_PATH={}",
                self.executable_output_path().display()
            ))
            .arg(format!(
                "-DLIBRARY_OUTPUT_PATH={}",
                self.library_output_path().display()
            ))
            .arg(format!(
                "-DBUILD_SHARED_LIBS={}",
                self.info.linkage.shared_libs_switch()
            ))
    }

    /// Build the generated tree; CMake picks the job count.
    pub fn build_command(&self) -> ProcessBuilder {
        self.cmake()
            .arg("--build")
            .arg(&self.info.build_dir)
            .arg("--parallel")
    }
}
