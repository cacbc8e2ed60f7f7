//! Test utilities for node-build unit tests.
//!
//! [`RecordingRunner`] stands in for the host when driving the pipelines: it
//! records every command line, returns scripted results, and can leave files
//! behind the way a download tool would.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut runner = RecordingRunner::new();
//! runner.fail_on(CommandPattern::StartsWith("docker build".into()), 1);
//!
//! run_pipeline(&config, &mut runner).unwrap_err();
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::path::PathBuf;

use crate::core::{BuildError, BuildResult};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Pattern for matching command lines.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Any => true,
        }
    }
}

/// Scripted behavior for matching commands.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Exit code to report (0 = success).
    pub exit_code: i32,
    /// File written before exiting, relative to the command's cwd.
    pub writes: Option<(PathBuf, Vec<u8>)>,
}

/// Command runner that records invocations instead of spawning them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    expectations: Vec<CommandExpectation>,
    calls: Vec<ProcessBuilder>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds.
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Make commands matching `pattern` exit with `code`.
    pub fn fail_on(&mut self, pattern: CommandPattern, code: i32) -> &mut Self {
        self.expectations.push(CommandExpectation {
            pattern,
            exit_code: code,
            writes: None,
        });
        self
    }

    /// Make commands matching `pattern` create `file` in their cwd, then exit with `code`.
    pub fn write_on(
        &mut self,
        pattern: CommandPattern,
        file: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
        code: i32,
    ) -> &mut Self {
        self.expectations.push(CommandExpectation {
            pattern,
            exit_code: code,
            writes: Some((file.into(), contents.into())),
        });
        self
    }

    /// Recorded invocations, in order.
    pub fn invocations(&self) -> &[ProcessBuilder] {
        &self.calls
    }

    /// Recorded command lines, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.iter().map(ProcessBuilder::display_command).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, process: &ProcessBuilder) -> BuildResult<()> {
        let command = process.display_command();
        self.calls.push(process.clone());

        let Some(exp) = self
            .expectations
            .iter()
            .find(|exp| exp.pattern.matches(&command))
        else {
            return Ok(());
        };

        if let Some((file, contents)) = &exp.writes {
            let path = match process.get_cwd() {
                Some(cwd) => cwd.join(file),
                None => file.clone(),
            };
            std::fs::write(&path, contents).map_err(|e| BuildError::io(&path, e))?;
        }

        if exp.exit_code != 0 {
            return Err(BuildError::SubprocessFailure {
                command,
                status: Some(exp.exit_code),
                detail: "scripted failure".to_string(),
            });
        }

        Ok(())
    }
}

/// Create a temporary Node checkout with an empty `src/` directory.
///
/// Returns the TempDir handle - dropping it will clean up the directory.
pub fn create_test_project() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    std::fs::create_dir_all(tmp.path().join("src")).expect("failed to create src dir");
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut runner = RecordingRunner::new();
        runner.run(&ProcessBuilder::new("docker").arg("run")).unwrap();
        runner.run(&ProcessBuilder::new("make").arg("-j2")).unwrap();

        assert_eq!(runner.calls(), vec!["docker run", "make -j2"]);
    }

    #[test]
    fn test_scripted_failure() {
        let mut runner = RecordingRunner::new();
        runner.fail_on(CommandPattern::StartsWith("make".into()), 2);

        let err = runner.run(&ProcessBuilder::new("make")).unwrap_err();
        assert!(matches!(
            err,
            BuildError::SubprocessFailure {
                status: Some(2),
                ..
            }
        ));
    }

    #[test]
    fn test_scripted_file_lands_in_cwd() {
        let tmp = create_test_project();
        let mut runner = RecordingRunner::new();
        runner.write_on(CommandPattern::Any, "out.bin", vec![9u8, 9], 0);

        runner
            .run(&ProcessBuilder::new("wget").cwd(tmp.path()))
            .unwrap();

        assert_eq!(std::fs::read(tmp.path().join("out.bin")).unwrap(), vec![9, 9]);
    }
}
