//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Run with inherited stdio and wait for completion.
    pub fn status(&self) -> io::Result<ProcessStatus> {
        let status = self.build_command().status()?;
        Ok(ProcessStatus::from(status))
    }

    /// Run with all stdio discarded and wait for completion.
    pub fn status_quiet(&self) -> io::Result<ProcessStatus> {
        let status = self
            .build_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(ProcessStatus::from(status))
    }

    /// Display the command for messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

impl fmt::Display for ProcessBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_command())
    }
}

/// How a finished child process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        ProcessStatus { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessStatus {
    fn from(status: ExitStatus) -> Self {
        ProcessStatus {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Executes subprocesses on behalf of the pipeline.
///
/// Spawn failures are returned as `Err`; a process that ran and exited
/// with any status is `Ok`.
pub trait ProcessRunner {
    /// Run a command with its output discarded.
    fn probe(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus>;

    /// Run a command with its output forwarded to ours.
    fn run(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn probe(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        tracing::debug!("probing `{}`", cmd);
        cmd.status_quiet()
    }

    fn run(&self, cmd: &ProcessBuilder) -> io::Result<ProcessStatus> {
        tracing::debug!("running `{}`", cmd);
        cmd.status()
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Resolve a program on PATH, keeping the name as given when it can't be found.
///
/// Explicit paths are returned untouched.
pub fn resolve_program(program: &Path) -> PathBuf {
    if program.components().count() > 1 {
        return program.to_path_buf();
    }

    match program.to_str().and_then(find_executable) {
        Some(path) => path,
        None => program.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["--build", "build/x64-debug", "--parallel"]);

        assert_eq!(
            pb.display_command(),
            "cmake --build build/x64-debug --parallel"
        );
    }

    #[test]
    fn test_process_status() {
        assert!(ProcessStatus::from_code(0).success());
        assert!(!ProcessStatus::from_code(3).success());
        assert!(!ProcessStatus { code: None }.success());
        assert_eq!(ProcessStatus::from_code(3).to_string(), "exit code 3");
    }

    #[test]
    fn test_resolve_program_keeps_explicit_path() {
        let path = Path::new("/opt/cmake/bin/cmake");
        assert_eq!(resolve_program(path), path);
    }

    #[test]
    fn test_resolve_program_unknown_name() {
        let name = Path::new("definitely-not-a-real-program-xyz");
        assert_eq!(resolve_program(name), name);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner() {
        let runner = SystemRunner;
        let ok = runner.probe(&ProcessBuilder::new("true")).unwrap();
        assert!(ok.success());

        let fail = runner.probe(&ProcessBuilder::new("false")).unwrap();
        assert_eq!(fail.code, Some(1));

        assert!(runner
            .probe(&ProcessBuilder::new("definitely-not-a-real-program-xyz"))
            .is_err());
    }
}
