//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.cmrun/config.toml` - User-wide defaults
//! - Project: `.cmrun/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::build_info::DEFAULT_BUILD_DIR;
use crate::core::host::{GeneratorTable, HostOs};

/// Default CMake program name.
pub const DEFAULT_CMAKE: &str = "cmake";

/// cmrun configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// CMake settings
    pub cmake: CMakeConfig,

    /// Build tree settings
    pub build: BuildConfig,

    /// Per-host generator overrides
    pub generators: GeneratorConfig,
}

/// CMake-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CMakeConfig {
    /// CMake executable (name on PATH or full path)
    pub program: Option<PathBuf>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base directory for build trees (default: `build`)
    pub dir: Option<PathBuf>,
}

/// Generator overrides, keyed by host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub windows: Option<String>,
    pub linux: Option<String>,
    pub macos: Option<String>,
    /// Generator for any other host
    pub default: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("{:#}", e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.cmake.program.is_some() {
            self.cmake.program = other.cmake.program;
        }

        if other.build.dir.is_some() {
            self.build.dir = other.build.dir;
        }

        let generators = other.generators;
        if generators.windows.is_some() {
            self.generators.windows = generators.windows;
        }
        if generators.linux.is_some() {
            self.generators.linux = generators.linux;
        }
        if generators.macos.is_some() {
            self.generators.macos = generators.macos;
        }
        if generators.default.is_some() {
            self.generators.default = generators.default;
        }
    }

    /// CMake program to invoke.
    pub fn cmake_program(&self) -> PathBuf {
        self.cmake
            .program
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CMAKE))
    }

    /// Base directory for build trees.
    pub fn build_base(&self) -> PathBuf {
        self.build
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR))
    }

    /// Built-in generator table with this config's overrides applied.
    pub fn generator_table(&self) -> GeneratorTable {
        let mut table = GeneratorTable::default();
        let overrides = [
            (HostOs::Windows, &self.generators.windows),
            (HostOs::Linux, &self.generators.linux),
            (HostOs::Darwin, &self.generators.macos),
        ];

        for (host, generator) in overrides {
            if let Some(generator) = generator {
                table.insert(host, generator.as_str());
            }
        }
        if let Some(ref fallback) = self.generators.default {
            table.set_fallback(fallback.as_str());
        }

        table
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cmrun/config.toml)
/// 2. Global config (~/.cmrun/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        tracing::debug!("global config: {}", global_path.display());
        config.merge(Config::load_or_default(global_path));
    }

    tracing::debug!("project config: {}", project_path.display());
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global cmrun config directory (~/.cmrun).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".cmrun"))
}

/// Get the global config path (~/.cmrun/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.cmrun/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".cmrun").join("config.toml")
}
