//! Preflight checks
//!
//! Confirms the NAND device node and the host tools exist before any
//! destructive action. The mkfs.msdos and fdisk probes invoke the tool
//! with no arguments and look for a known substring in the resulting
//! text, which is how specific dosfstools/util-linux builds identify
//! themselves; a plain PATH lookup would accept incompatible builds.

use std::path::Path;

use crate::config::defaults;
use crate::core::profile::BurnProfile;
use crate::core::runner::ToolRunner;

/// Result of a single environment check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the requirement being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Failure description
    pub detail: Option<String>,
    /// Remediation hints, one line each
    pub hints: Vec<String>,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
            hints: Vec::new(),
        }
    }

    /// Create a failing check result
    pub fn fail(name: impl Into<String>, detail: impl Into<String>, hints: &[&str]) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
            hints: hints.iter().map(|h| (*h).to_string()).collect(),
        }
    }
}

/// Collected check results
#[derive(Debug, Default)]
pub struct PreflightReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Whether every check passed
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// All failed checks
    pub fn failed(&self) -> Vec<&CheckResult> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Count of passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }
}

/// Check that the NAND device node exists
pub fn check_nand_device(profile: &BurnProfile) -> CheckResult {
    let name = format!("nand device ({})", profile.nand_device);
    if Path::new(&profile.nand_device).exists() {
        CheckResult::pass(name)
    } else {
        CheckResult::fail(
            name,
            "nand device driver apparently not enabled",
            &[
                "Please enable 'SUNXI Nandflash Driver' through menuconfig like following:",
                "Device Drivers -> Block devices ->",
                "<*> SUNXI Nandflash Driver",
                "    [*] Create old nand device names (nanda-nandz)",
            ],
        )
    }
}

/// Check that the FAT formatter is the dosfstools build
pub fn check_fat_formatter(runner: &dyn ToolRunner) -> CheckResult {
    match runner.run("mkfs.msdos", &[]) {
        Ok(output) if output.combined().contains(defaults::MARKER_FAT_TOOL) => {
            CheckResult::pass("mkfs.msdos")
        }
        _ => CheckResult::fail(
            "mkfs.msdos",
            "mkfs.msdos is not installed",
            &[
                "if you are using a debian system, please install mkfs.msdos using following command:",
                "apt-get install dosfstools",
            ],
        ),
    }
}

/// Check that fdisk is available for the geometry query
pub fn check_partition_lister(runner: &dyn ToolRunner) -> CheckResult {
    match runner.run("fdisk", &[]) {
        Ok(output) if output.combined().contains(defaults::MARKER_FDISK_TOOL) => {
            CheckResult::pass("fdisk")
        }
        _ => CheckResult::fail(
            "fdisk",
            "fdisk is not installed",
            &[
                "if you are using a debian system, please install fdisk using following command:",
                "apt-get install util-linux",
            ],
        ),
    }
}

/// Check a tool by PATH lookup
fn check_on_path(tool: &str, detail: &str, hints: &[&str]) -> CheckResult {
    if which::which(tool).is_ok() {
        CheckResult::pass(tool)
    } else {
        CheckResult::fail(tool, detail, hints)
    }
}

/// Run the checks that gate a burn
pub fn run_preflight(profile: &BurnProfile, runner: &dyn ToolRunner) -> PreflightReport {
    PreflightReport {
        checks: vec![
            check_nand_device(profile),
            check_fat_formatter(runner),
            check_partition_lister(runner),
        ],
    }
}

/// Run the full doctor check set: the burn gates plus the remaining
/// tools the pipeline will invoke.
pub fn run_doctor(profile: &BurnProfile, runner: &dyn ToolRunner) -> PreflightReport {
    let mut report = run_preflight(profile, runner);
    report.checks.push(check_on_path(
        "nand-part",
        "nand-part is not installed",
        &["build nand-part from sunxi-tools and place it on PATH"],
    ));
    report.checks.push(check_on_path(
        "mkfs.ext4",
        "mkfs.ext4 is not installed",
        &[
            "if you are using a debian system, please install mkfs.ext4 using following command:",
            "apt-get install e2fsprogs",
        ],
    ));
    report
}
