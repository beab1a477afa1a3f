//! Global context for a cmrun invocation.
//!
//! Provides centralized access to the working directory, host identity and
//! the settings loaded from configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::host::{GeneratorTable, HostOs};
use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::process::resolve_program;

/// Everything about the environment the pipeline needs to know.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Source directory; every command runs here.
    cwd: PathBuf,
    host: HostOs,
    generators: GeneratorTable,
    cmake: PathBuf,
    build_base: PathBuf,
}

impl GlobalContext {
    /// Create a context for the current directory, loading global and
    /// project configuration.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&cwd));

        Ok(GlobalContext::from_config(cwd, HostOs::current(), &config))
    }

    /// Create a context from already-loaded configuration.
    pub fn from_config(cwd: PathBuf, host: HostOs, config: &Config) -> Self {
        let cmake = resolve_program(&config.cmake_program());
        tracing::debug!("host: {}, cmake: {}", host, cmake.display());

        GlobalContext {
            cwd,
            host,
            generators: config.generator_table(),
            cmake,
            build_base: config.build_base(),
        }
    }

    /// Override the CMake program (e.g. from `--cmake`).
    pub fn with_cmake(mut self, program: impl AsRef<Path>) -> Self {
        self.cmake = resolve_program(program.as_ref());
        self
    }

    /// Pretend to run on a different host.
    pub fn with_host(mut self, host: HostOs) -> Self {
        self.host = host;
        self
    }

    pub fn with_generators(mut self, generators: GeneratorTable) -> Self {
        self.generators = generators;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn host(&self) -> &HostOs {
        &self.host
    }

    pub fn cmake(&self) -> &Path {
        &self.cmake
    }

    pub fn build_base(&self) -> &Path {
        &self.build_base
    }

    /// CMake generator for this host.
    pub fn generator(&self) -> &str {
        self.generators.generator_for(&self.host)
    }

    /// Executable name used when none is given: the directory's own name.
    pub fn default_program_name(&self) -> Option<String> {
        self.cwd
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
    }
}
