//! CLI command for `nandburn geometry`
//!
//! Read-only: queries the device's sector count and prints the layout
//! the burn would create, without writing anything.

use std::path::Path;

use anyhow::Result;

use crate::core::burn::{print_geometry, resolve_geometry};
use crate::core::profile::load_profile;
use crate::infra::process::SystemRunner;

/// Execute the geometry command
pub fn execute(config: Option<&Path>) -> Result<()> {
    let profile = load_profile(config)?;
    let runner = SystemRunner;
    let geometry = resolve_geometry(&profile, &runner)?;
    print_geometry(&geometry);
    Ok(())
}
