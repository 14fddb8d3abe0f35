//! Output formatting
//!
//! The console contract is a strictly ordered log of tagged lines; the
//! board's flashing workflow greps for them, so the tags are fixed.

use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Global output configuration applied once at startup
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    quiet: bool,
    json: bool,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Apply this configuration globally
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }
}

/// Whether quiet mode is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether JSON output mode is active
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Fixed log line tags
pub mod tag {
    /// Informational line
    pub const INFO: &str = "[INFO]";

    /// A stage is about to run
    pub const EXEC: &str = "[EXEC]";

    /// A stage completed
    pub const DONE: &str = "[DONE]";

    /// Fatal diagnostic; always the last structured line
    pub const ERRO: &str = "[ERRO]";

    /// Destructive-action warning
    pub const WARN: &str = "[WARN]";

    /// Continuation of the previous line
    pub const CONT: &str = "[----]";
}

/// Print an informational line
pub fn print_info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", tag::INFO, msg);
    }
}

/// Print a stage-start line
pub fn print_exec(msg: &str) {
    if !is_quiet() {
        println!("{} {}", tag::EXEC, msg);
    }
}

/// Print a stage-completion line
pub fn print_done(msg: &str) {
    if !is_quiet() {
        println!("{} {}", tag::DONE, msg);
    }
}

/// Print a warning line
pub fn print_warn(msg: &str) {
    if !is_quiet() {
        println!("{} {}", tag::WARN, msg);
    }
}

/// Print an error line; never suppressed
pub fn print_erro(msg: &str) {
    eprintln!("{} {}", tag::ERRO, msg);
}

/// Print a continuation of the previous error line
pub fn print_cont(msg: &str) {
    eprintln!("{} {}", tag::CONT, msg);
}

/// Display a failure and its causes as tagged lines
pub fn display_error(err: &anyhow::Error) {
    print_erro(&err.to_string());
    for cause in err.chain().skip(1) {
        print_cont(&cause.to_string());
    }
}
