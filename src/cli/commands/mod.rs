//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod burn;
pub mod doctor;
pub mod geometry;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision the NAND: bootloader, partitions, filesystems, distro copy
    Burn {
        /// Profile TOML overriding device paths and board defaults
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Skip the interactive confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Fail when mount/copy/unmount helpers exit nonzero
        #[arg(long)]
        strict: bool,
    },

    /// Check the host for the NAND driver and required tools
    Doctor {
        /// Profile TOML overriding device paths and board defaults
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Query the device and print the partition layout without writing
    Geometry {
        /// Profile TOML overriding device paths and board defaults
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Burn {
                config,
                yes,
                strict,
            } => burn::execute(config.as_deref(), yes, strict),
            Self::Doctor { config } => doctor::execute(config.as_deref()),
            Self::Geometry { config } => geometry::execute(config.as_deref()),
        }
    }
}
