//! CLI command implementation for `nandburn burn`

use std::path::Path;

use anyhow::Result;

use crate::core::burn::{run_burn, BurnOptions, BurnOutcome};
use crate::core::profile::load_profile;
use crate::infra::process::SystemRunner;

/// Execute the burn command
pub fn execute(config: Option<&Path>, yes: bool, strict: bool) -> Result<()> {
    let profile = load_profile(config)?;
    let runner = SystemRunner;
    let options = BurnOptions {
        assume_yes: yes,
        strict,
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    match run_burn(&profile, &runner, &options, &mut input)? {
        BurnOutcome::Completed | BurnOutcome::Cancelled => Ok(()),
    }
}
