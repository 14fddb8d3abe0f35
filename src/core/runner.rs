//! External tool invocation seam
//!
//! Every pipeline stage decides success by looking for a known substring
//! in the tool's captured text, never by exit status - several of the
//! tools involved exit nonzero on success and vice versa. [`ToolRunner`]
//! is the single seam to the outside world; the real implementation lives
//! in [`crate::infra::process`], tests substitute scripted fakes.

use std::time::Duration;

use crate::error::StageError;

/// Captured result of one external tool invocation
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, if the process exited normally
    pub status: Option<i32>,
}

impl ToolOutput {
    /// Create a captured output
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, status: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            status,
        }
    }

    /// Both streams concatenated, for marker matching
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }

    /// Whether the process exited zero
    pub fn exit_ok(&self) -> bool {
        self.status == Some(0)
    }
}

/// Abstraction over spawning external tools
pub trait ToolRunner {
    /// Run a tool to completion, capturing its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput, StageError>;

    /// Run a tool that prompts on its input stream.
    ///
    /// The implementation must wait `settle` before writing `reply`, close
    /// the input stream afterwards, and drain the output streams while the
    /// tool runs so it cannot deadlock on a full pipe. Output drained
    /// during the run and any trailing output belong to the same captured
    /// result.
    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        reply: &str,
        settle: Duration,
    ) -> Result<ToolOutput, StageError>;
}
