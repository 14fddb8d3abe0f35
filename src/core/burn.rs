//! Burn orchestration
//!
//! Strict linear pipeline: preflight, geometry query, operator
//! confirmation, then the destructive stages in the order the board's
//! flashing workflow expects (bootloader first, then the partition
//! table). The first failing stage aborts the run; there is no rollback
//! of partitioning or formatting already performed.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};

use crate::cli::output::{self, print_done, print_exec, print_info, print_warn};
use crate::core::geometry::{self, NandGeometry};
use crate::core::preflight;
use crate::core::profile::BurnProfile;
use crate::core::runner::ToolRunner;
use crate::core::stages;

/// Options for one burn run
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnOptions {
    /// Skip the interactive confirmation gate
    pub assume_yes: bool,
    /// Fail when helper commands (mount/copy/unmount) exit nonzero
    pub strict: bool,
}

/// How a burn run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnOutcome {
    /// All stages completed
    Completed,
    /// Operator answered `n` at the gate
    Cancelled,
}

/// Operator answer at the confirmation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// `y` or `Y`
    Proceed,
    /// `n` or `N`
    Cancel,
    /// Anything else, including multi-character input
    Invalid,
}

/// Classify the operator's answer. Only a single `y`/`n` character
/// (case-insensitive, trailing newline ignored) counts; everything else
/// is invalid and aborts the run.
pub fn parse_confirmation(line: &str) -> Confirmation {
    let value = line.trim_end_matches(&['\r', '\n'][..]);
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match c.to_ascii_lowercase() {
            'y' => Confirmation::Proceed,
            'n' => Confirmation::Cancel,
            _ => Confirmation::Invalid,
        },
        _ => Confirmation::Invalid,
    }
}

/// Print the computed layout, exactly as the flashing workflow expects it
pub fn print_geometry(geometry: &NandGeometry) {
    print_info(&format!("nand-sectors: {}", geometry.total_sectors));
    print_info(&format!("nand-total-size: {} MB", geometry.total_megabytes()));
    print_info(&format!(
        "boot-partition-size: {} MB",
        geometry.boot_megabytes()
    ));
    print_info(&format!(
        "root-partition-size: {} MB",
        geometry.root_megabytes()
    ));
}

/// Query the device and resolve the partition layout
pub fn resolve_geometry(
    profile: &BurnProfile,
    runner: &dyn ToolRunner,
) -> Result<NandGeometry> {
    let listing = runner
        .run("fdisk", &["-l", &profile.nand_device])
        .context("querying nand geometry")?;
    let total_sectors =
        geometry::extract_total_sectors(&listing.combined()).context("reading nand geometry")?;
    Ok(NandGeometry::resolve(total_sectors, profile)?)
}

/// Run the provisioning pipeline end to end.
///
/// `input` supplies the operator's confirmation answer; the CLI passes
/// locked stdin, tests pass a cursor.
pub fn run_burn(
    profile: &BurnProfile,
    runner: &dyn ToolRunner,
    options: &BurnOptions,
    input: &mut dyn BufRead,
) -> Result<BurnOutcome> {
    print_info(&format!("nandburn v{}", env!("CARGO_PKG_VERSION")));

    let report = preflight::run_preflight(profile, runner);
    if !report.all_passed() {
        for check in report.failed() {
            let detail = check.detail.as_deref().unwrap_or("check failed");
            output::print_erro(&format!("{} - {}", check.name, detail));
            for hint in &check.hints {
                output::print_cont(hint);
            }
        }
        return Err(anyhow!("preflight checks failed"));
    }

    let geometry = resolve_geometry(profile, runner)?;
    print_geometry(&geometry);

    if options.assume_yes {
        print_info("skipping confirmation (--yes)");
    } else {
        print_warn("This will erase all nand device!");
        print!("{} Do you want to continue?  [y/n]: ", output::tag::WARN);
        std::io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        input.read_line(&mut line).context("reading confirmation")?;
        match parse_confirmation(&line) {
            Confirmation::Proceed => {}
            Confirmation::Cancel => {
                print_info("canceled by user!");
                return Ok(BurnOutcome::Cancelled);
            }
            Confirmation::Invalid => {
                let raw = line.trim_end_matches(&['\r', '\n'][..]);
                return Err(anyhow!("type 'y' to yes or 'n' to no"))
                    .context(format!("invalid option: '{raw}'"));
            }
        }
    }

    print_exec("writing bootloader to nand");
    stages::write_bootloader(profile, runner).context("on writing bootloader to nand")?;
    print_done("bootloader written successfully!");

    print_exec("creating nand partitions");
    stages::create_partitions(profile, runner, &geometry)
        .context("on creating nand partitions")?;
    print_done("partitions successfully created!");

    print_exec("formatting boot partition");
    stages::format_boot_partition(profile, runner).context("on formatting boot partition")?;
    print_done("boot partition successfully formatted!");

    print_exec("formatting root partition");
    stages::format_root_partition(profile, runner).context("on formatting root partition")?;
    print_done("root partition successfully formatted!");

    print_exec("creating transfer directories");
    stages::stage_transfer(profile, runner, options.strict)
        .context("on preparing transfer directories")?;
    print_done("transfer directories ready!");

    print_exec("burning distro to nand");
    stages::copy_distro(profile, runner, options.strict).context("on burning distro to nand")?;
    print_done("distro was successfully burned to nand flash");

    print_exec("finishing burn procedure");
    stages::finish(profile, runner, options.strict).context("on finishing burn procedure")?;
    print_done("100% complete! now poweroff the board and take out the sdcard");

    Ok(BurnOutcome::Completed)
}
