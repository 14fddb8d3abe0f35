//! CLI command for `nandburn doctor`
//!
//! Checks the host for the NAND driver and every tool the burn pipeline
//! will invoke, and reports issues with remediation hints.

use std::path::Path;

use anyhow::Result;

use crate::cli::output::{is_json, print_cont, print_done, print_erro, print_info};
use crate::core::preflight::run_doctor;
use crate::core::profile::load_profile;
use crate::infra::process::SystemRunner;

/// Execute the doctor command
pub fn execute(config: Option<&Path>) -> Result<()> {
    let profile = load_profile(config)?;
    let runner = SystemRunner;
    let report = run_doctor(&profile, &runner);

    // JSON output mode
    if is_json() {
        let payload = serde_json::json!({
            "status": if report.all_passed() { "ok" } else { "error" },
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "passed": c.passed,
                "detail": c.detail,
                "hints": c.hints,
            })).collect::<Vec<_>>(),
            "passed_count": report.passed_count(),
            "total_count": report.checks.len(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);

        if !report.all_passed() {
            return Err(anyhow::anyhow!("missing host requirements"));
        }
        return Ok(());
    }

    print_info("checking burn environment...");
    for check in &report.checks {
        if check.passed {
            print_done(&check.name);
        } else {
            let detail = check.detail.as_deref().unwrap_or("check failed");
            print_erro(&format!("{} - {}", check.name, detail));
            for hint in &check.hints {
                print_cont(hint);
            }
        }
    }

    let passed = report.passed_count();
    let total = report.checks.len();
    if report.all_passed() {
        print_info(&format!("all checks passed ({passed}/{total})"));
        Ok(())
    } else {
        print_info(&format!("{passed}/{total} checks passed"));
        Err(anyhow::anyhow!("missing host requirements"))
    }
}
