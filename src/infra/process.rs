//! Process spawning
//!
//! [`SystemRunner`] is the production [`ToolRunner`]: plain captured runs
//! for most tools, plus the feed-and-drain protocol nand-part needs.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::runner::{ToolOutput, ToolRunner};
use crate::error::StageError;

/// Runs external tools as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

fn launch_error(program: &str, source: std::io::Error) -> StageError {
    StageError::Launch {
        program: program.to_string(),
        source,
    }
}

/// Read a child stream to EOF on its own thread
fn drain<R: Read + Send + 'static>(reader: Option<R>) -> Option<JoinHandle<String>> {
    reader.map(|mut r| {
        thread::spawn(move || {
            let mut buffer = String::new();
            let _ = r.read_to_string(&mut buffer);
            buffer
        })
    })
}

fn collect(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ToolOutput, StageError> {
        tracing::debug!("running `{} {}`", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| launch_error(program, source))?;
        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }

    fn run_interactive(
        &self,
        program: &str,
        args: &[&str],
        reply: &str,
        settle: Duration,
    ) -> Result<ToolOutput, StageError> {
        tracing::debug!("running `{} {}` (interactive)", program, args.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| launch_error(program, source))?;

        // drain both streams while the child runs; an undrained pipe can
        // deadlock the tool once its buffer fills
        let stdout_handle = drain(child.stdout.take());
        let stderr_handle = drain(child.stderr.take());

        // the tool prints its table and only then reads the prompt; the
        // settle delay is a compatibility shim for that window
        thread::sleep(settle);
        if let Some(mut stdin) = child.stdin.take() {
            // a write failure here means the child already exited; the
            // marker check below reports that as a stage failure
            let _ = stdin.write_all(reply.as_bytes());
            let _ = stdin.flush();
        }

        let status = child.wait().map_err(|source| launch_error(program, source))?;
        Ok(ToolOutput {
            stdout: collect(stdout_handle),
            stderr: collect(stderr_handle),
            status: status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_output_and_status() {
        let runner = SystemRunner;
        let output = runner.run("sh", &["-c", "echo out; echo err >&2; exit 3"]).unwrap();
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
        assert_eq!(output.status, Some(3));
    }

    #[test]
    fn test_run_missing_program_is_launch_error() {
        let runner = SystemRunner;
        let err = runner
            .run("definitely-not-a-real-tool-2719", &[])
            .unwrap_err();
        assert!(matches!(err, StageError::Launch { .. }));
    }

    #[test]
    fn test_run_interactive_feeds_reply_and_drains() {
        let runner = SystemRunner;
        let output = runner
            .run_interactive(
                "sh",
                &["-c", "read reply; echo \"got $reply\""],
                "Y\n",
                Duration::from_millis(0),
            )
            .unwrap();
        assert_eq!(output.stdout, "got Y\n");
        assert_eq!(output.status, Some(0));
    }

    #[test]
    fn test_run_interactive_collects_trailing_output() {
        // output emitted after stdin closes still lands in the capture
        let runner = SystemRunner;
        let output = runner
            .run_interactive(
                "sh",
                &["-c", "read reply; echo early; sleep 0.05; echo late"],
                "Y\n",
                Duration::from_millis(0),
            )
            .unwrap();
        assert!(output.stdout.contains("early"));
        assert!(output.stdout.contains("late"));
    }
}
