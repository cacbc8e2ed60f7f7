//! Subprocess execution utilities.
//!
//! Every external command in the build goes through [`CommandRunner`]. The
//! system runner inherits stdio so tool output reaches the user directly, and
//! treats a non-zero exit or a spawn error as fatal.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::{BuildError, BuildResult};

/// Builder for subprocess execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
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
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
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
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the working directory, if one was set.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Run the command with inherited stdio and require a zero exit status.
    pub fn run_checked(&self) -> BuildResult<()> {
        let command = self.display_command();
        tracing::info!("{}", command);

        let status = self.build_command().status().map_err(|e| {
            let mut detail = e.to_string();
            if find_executable(&self.program).is_none() {
                detail.push_str(&format!(
                    " (`{}` not found in PATH)",
                    self.program.display()
                ));
            }
            BuildError::SubprocessFailure {
                command: command.clone(),
                status: None,
                detail,
            }
        })?;

        if !status.success() {
            return Err(BuildError::SubprocessFailure {
                command,
                status: status.code(),
                detail: format!("process exited unsuccessfully ({})", status),
            });
        }

        Ok(())
    }

    /// Display the command for logs and error messages.
    ///
    /// Lossy for non-UTF-8 arguments; the command itself receives them intact.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// Runs external commands for the build stages.
pub trait CommandRunner {
    /// Run `process` to completion, failing on spawn error or non-zero exit.
    fn run(&mut self, process: &ProcessBuilder) -> BuildResult<()>;
}

/// Runs commands on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, process: &ProcessBuilder) -> BuildResult<()> {
        process.run_checked()
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}
