//! CLI definitions using clap.

use std::path::PathBuf;

use clap::builder::{PossibleValue, PossibleValuesParser, TypedValueParser};
use clap::Parser;

use cmrun::{Architecture, BuildMode, Linkage};

/// cmrun - configure, build and run a CMake project in one step
#[derive(Parser)]
#[command(name = "cmrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target architecture
    #[arg(
        default_value = "x64",
        value_parser = PossibleValuesParser::new([
            PossibleValue::new("x64").help("64-bit architecture (default)"),
            PossibleValue::new("x86").help("32-bit architecture"),
        ])
        .try_map(|s| s.parse::<Architecture>()),
    )]
    pub architecture: Architecture,

    /// Build configuration
    #[arg(
        default_value = "d",
        value_parser = PossibleValuesParser::new([
            PossibleValue::new("d").help("Debug build with symbols (default)"),
            PossibleValue::new("r").help("Release build optimized for speed"),
        ])
        .try_map(|s| s.parse::<BuildMode>()),
    )]
    pub build_type: BuildMode,

    /// Library linkage type
    #[arg(
        default_value = "st",
        value_parser = PossibleValuesParser::new([
            PossibleValue::new("st").help("Static library linkage (default)"),
            PossibleValue::new("sh").help("Shared library/DLL linkage"),
        ])
        .try_map(|s| s.parse::<Linkage>()),
    )]
    pub library_type: Linkage,

    /// Output executable name (default: current directory name)
    pub program_name: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// CMake executable to use
    #[arg(long, env = "CMRUN_CMAKE", value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Show what would run without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum, exclusive = true)]
    pub completions: Option<clap_complete::Shell>,
}
