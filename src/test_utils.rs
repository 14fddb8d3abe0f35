//! Scripted [`ToolRunner`] fake shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use crate::core::runner::{ToolOutput, ToolRunner};
use crate::error::StageError;

/// One recorded tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    /// Text fed to the tool's stdin, for interactive invocations
    pub reply: Option<String>,
}

/// A [`ToolRunner`] that replays scripted outputs and records every call.
///
/// Outputs are queued per program and consumed in order, so a program
/// invoked twice can answer differently each time. A program with no
/// queued output left answers with empty text and exit zero.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    scripts: RefCell<HashMap<String, VecDeque<ToolOutput>>>,
    missing: RefCell<HashSet<String>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an output for the next invocation of `program`
    pub fn script(&self, program: &str, output: ToolOutput) {
        self.scripts
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .push_back(output);
    }

    /// Make every invocation of `program` fail to launch, as if the
    /// binary were not installed
    pub fn fail_launch(&self, program: &str) {
        self.missing.borrow_mut().insert(program.to_string());
    }

    /// Every call recorded so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn invoke(
        &self,
        program: &str,
        args: &[&str],
        reply: Option<&str>,
    ) -> Result<ToolOutput, StageError> {
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            reply: reply.map(ToString::to_string),
        });

        if self.missing.borrow().contains(program) {
            return Err(StageError::Launch {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        let output = self
            .scripts
            .borrow_mut()
            .get_mut(program)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| ToolOutput::new("", "", Some(0)));
        Ok(output)
    }
}

impl ToolRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput, StageError> {
        self.invoke(program, args, None)
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        reply: &str,
        _settle: Duration,
    ) -> Result<ToolOutput, StageError> {
        self.invoke(program, args, Some(reply))
    }
}
