//! Implementation of the configure → compile → run pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::builder::cmake::CMakeBuilder;
use crate::core::build_info::BuildInfo;
use crate::core::invocation::Invocation;
use crate::util::context::GlobalContext;
use crate::util::process::{ProcessBuilder, ProcessRunner, ProcessStatus};
use crate::util::shell::{Shell, Status};

/// Options for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print what would run without spawning anything
    pub dry_run: bool,
}

/// Failures that stop the pipeline. Each maps to exit code 1.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CMake not found (`{program}`); install CMake and add it to PATH")]
    ToolMissing {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program} --version` failed with {status}; check your CMake installation")]
    ToolUnusable {
        program: String,
        status: ProcessStatus,
    },

    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("CMake configuration failed with {status}")]
    ConfigureFailed { status: ProcessStatus },

    #[error("compilation failed with {status}")]
    CompileFailed { status: ProcessStatus },
}

/// How a run that got past compilation ended.
///
/// None of these are failures of the wrapper itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Dry run; nothing was spawned.
    Planned,
    /// The binary ran; `status` is its own exit status.
    Executed { path: PathBuf, status: ProcessStatus },
    /// The binary exists but could not be started.
    LaunchFailed { path: PathBuf, reason: String },
    /// No binary at the expected location.
    ExecutableMissing { path: PathBuf },
    /// No program name was given and the directory has no usable name.
    NoProgramName,
}

/// Check that CMake can be invoked at all.
pub fn validate_environment<R: ProcessRunner + ?Sized>(
    cmake: &CMakeBuilder<'_>,
    runner: &R,
) -> Result<(), PipelineError> {
    let cmd = cmake.version_command();
    let program = cmd.get_program().display().to_string();

    match runner.probe(&cmd) {
        Ok(status) if status.success() => {
            tracing::debug!("found {}", program);
            Ok(())
        }
        Ok(status) => Err(PipelineError::ToolUnusable { program, status }),
        Err(source) => Err(PipelineError::ToolMissing { program, source }),
    }
}

fn run_checked<R: ProcessRunner + ?Sized>(
    runner: &R,
    cmd: &ProcessBuilder,
) -> Result<ProcessStatus, PipelineError> {
    runner.run(cmd).map_err(|source| PipelineError::Spawn {
        command: cmd.display_command(),
        source,
    })
}

/// Generate build files for `info`.
pub fn configure<R: ProcessRunner + ?Sized>(
    cmake: &CMakeBuilder<'_>,
    info: &BuildInfo,
    runner: &R,
    shell: &Shell,
) -> Result<(), PipelineError> {
    let cmd = cmake.configure_command();
    let span = shell.span(Status::Configuring, &cmd);

    let status = run_checked(runner, &cmd)?;
    if !status.success() {
        return Err(PipelineError::ConfigureFailed { status });
    }

    span.finish_with_message(format!("configured `{}`", info.build_dir.display()));
    Ok(())
}

/// Build the configured tree.
pub fn compile<R: ProcessRunner + ?Sized>(
    cmake: &CMakeBuilder<'_>,
    info: &BuildInfo,
    runner: &R,
    shell: &Shell,
) -> Result<(), PipelineError> {
    let cmd = cmake.build_command();
    let span = shell.span(Status::Compiling, info.build_dir.display());
    if shell.is_verbose() {
        shell.note(&cmd);
    }

    let status = run_checked(runner, &cmd)?;
    if !status.success() {
        return Err(PipelineError::CompileFailed { status });
    }

    span.finish_with_message(format!("built `{}`", info.build_dir.display()));
    Ok(())
}

/// Expected location of the built executable, relative to the source directory.
pub fn executable_path(ctx: &GlobalContext, info: &BuildInfo, program_name: &str) -> PathBuf {
    let file_name = format!("{}{}", program_name, ctx.host().exe_suffix());
    info.bin_dir().join(file_name)
}

/// Look for the built executable.
///
/// Returns the relative path when it exists, `Err` with the path that was
/// checked otherwise.
pub fn locate_executable(
    ctx: &GlobalContext,
    info: &BuildInfo,
    program_name: &str,
) -> Result<PathBuf, PathBuf> {
    let path = executable_path(ctx, info, program_name);
    if ctx.cwd().join(&path).is_file() {
        Ok(path)
    } else {
        Err(path)
    }
}

/// Run the built executable with no arguments.
///
/// A failing or unlaunchable binary is reported but never turned into an error.
pub fn execute_binary<R: ProcessRunner + ?Sized>(
    ctx: &GlobalContext,
    path: &Path,
    runner: &R,
    shell: &Shell,
) -> RunOutcome {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    shell.status(Status::Running, format!("`{}`", path.display()));

    let cmd = ProcessBuilder::new(ctx.cwd().join(path)).cwd(ctx.cwd());
    match runner.run(&cmd) {
        Ok(status) if status.success() => {
            shell.status(Status::Finished, format!("`{}` exited successfully", name));
            RunOutcome::Executed {
                path: path.to_path_buf(),
                status,
            }
        }
        Ok(status) => {
            match status.code {
                Some(code) => shell.error(format!("`{}` exited abnormally (code {})", name, code)),
                None => shell.error(format!("`{}` was terminated by a signal", name)),
            }
            RunOutcome::Executed {
                path: path.to_path_buf(),
                status,
            }
        }
        Err(e) => {
            shell.warn(format!("could not start `{}`: {}", path.display(), e));
            RunOutcome::LaunchFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    }
}

fn print_summary(ctx: &GlobalContext, info: &BuildInfo, program_name: Option<&str>, shell: &Shell) {
    let rule = "=".repeat(50);
    let rows = [
        ("working dir", ctx.cwd().display().to_string()),
        ("architecture", info.architecture.as_str().to_uppercase()),
        ("build type", info.mode.to_string()),
        ("library type", info.linkage.to_string()),
        ("build dir", info.build_dir.display().to_string()),
        ("program", program_name.unwrap_or("(unknown)").to_string()),
    ];

    shell.line(&rule);
    for (key, value) in rows {
        shell.line(format!("{:>14}: {}", key, value));
    }
    shell.line(&rule);
}

/// Configure, compile, locate and run.
///
/// Returns `Err` only for the fatal stages (environment check, configure,
/// compile). Anything that happens after compilation is reported through
/// the returned [`RunOutcome`].
pub fn cmake_run<R: ProcessRunner + ?Sized>(
    ctx: &GlobalContext,
    invocation: &Invocation,
    opts: &RunOptions,
    runner: &R,
    shell: &Shell,
) -> Result<RunOutcome, PipelineError> {
    let info = BuildInfo::derive(invocation, ctx.build_base());
    let cmake = CMakeBuilder::new(ctx, &info);
    let program_name = invocation
        .program_name
        .clone()
        .or_else(|| ctx.default_program_name());

    if opts.dry_run {
        print_summary(ctx, &info, program_name.as_deref(), shell);
        shell.note(format!("would run `{}`", cmake.configure_command()));
        shell.note(format!("would run `{}`", cmake.build_command()));
        if let Some(ref name) = program_name {
            let path = executable_path(ctx, &info, name);
            shell.note(format!("would run `{}`", path.display()));
        }
        return Ok(RunOutcome::Planned);
    }

    validate_environment(&cmake, runner)?;
    print_summary(ctx, &info, program_name.as_deref(), shell);

    configure(&cmake, &info, runner, shell)?;
    compile(&cmake, &info, runner, shell)?;

    let Some(program_name) = program_name else {
        shell.warn("no program name given and the current directory has no name; skipping run");
        return Ok(RunOutcome::NoProgramName);
    };

    match locate_executable(ctx, &info, &program_name) {
        Ok(path) => Ok(execute_binary(ctx, &path, runner, shell)),
        Err(path) => {
            shell.warn(format!("executable not found: {}", path.display()));
            Ok(RunOutcome::ExecutableMissing { path })
        }
    }
}
