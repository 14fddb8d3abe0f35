//! Burn profile (nandburn.toml) parsing
//!
//! All the fixed paths and constants of the target board collected into
//! one immutable struct. The defaults are the A20 board family values;
//! a profile TOML can override any subset of them, which is also how the
//! integration tests point the pipeline at fake devices and tools.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Immutable per-run configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BurnProfile {
    /// Raw NAND device node
    pub nand_device: String,

    /// Boot partition node
    pub boot_device: String,

    /// Root partition node
    pub root_device: String,

    /// Removable source medium partition
    pub source_device: String,

    /// Mount point for the boot partition
    pub boot_mount: PathBuf,

    /// Mount point for the root partition
    pub root_mount: PathBuf,

    /// Mount point for the source medium
    pub source_mount: PathBuf,

    /// Bootloader image file name
    pub bootloader_image: String,

    /// Boot file set archive name
    pub boot_archive: String,

    /// Kernel image name under the source boot directory
    pub kernel_image: String,

    /// Board binary blob name under the source boot directory
    pub board_blob: String,

    /// Flash controller identifier for nand-part
    pub flash_controller: String,

    /// Boot partition start offset, in sectors
    pub boot_partition_offset: u64,

    /// Boot partition size, in sectors
    pub boot_partition_size: u64,

    /// Delay before answering the nand-part prompt, in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for BurnProfile {
    fn default() -> Self {
        Self {
            nand_device: defaults::NAND_DEVICE.to_string(),
            boot_device: defaults::BOOT_DEVICE.to_string(),
            root_device: defaults::ROOT_DEVICE.to_string(),
            source_device: defaults::SOURCE_DEVICE.to_string(),
            boot_mount: PathBuf::from(defaults::BOOT_MOUNT),
            root_mount: PathBuf::from(defaults::ROOT_MOUNT),
            source_mount: PathBuf::from(defaults::SOURCE_MOUNT),
            bootloader_image: defaults::BOOTLOADER_IMAGE.to_string(),
            boot_archive: defaults::BOOT_ARCHIVE.to_string(),
            kernel_image: defaults::KERNEL_IMAGE.to_string(),
            board_blob: defaults::BOARD_BLOB.to_string(),
            flash_controller: defaults::FLASH_CONTROLLER.to_string(),
            boot_partition_offset: defaults::BOOT_PARTITION_OFFSET,
            boot_partition_size: defaults::BOOT_PARTITION_SIZE,
            settle_delay_ms: defaults::SETTLE_DELAY_MS,
        }
    }
}

impl BurnProfile {
    /// Parse a profile from TOML content
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Settle delay before answering the nand-part prompt
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Load a profile from an optional TOML path, falling back to the board
/// defaults.
pub fn load_profile(path: Option<&Path>) -> Result<BurnProfile> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("reading profile '{}'", p.display()))?;
            BurnProfile::from_toml(&content)
                .with_context(|| format!("parsing profile '{}'", p.display()))
        }
        None => Ok(BurnProfile::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_board_constants() {
        let profile = BurnProfile::default();
        assert_eq!(profile.nand_device, "/dev/nand");
        assert_eq!(profile.boot_device, "/dev/nanda");
        assert_eq!(profile.root_device, "/dev/nandb");
        assert_eq!(profile.source_device, "/dev/mmcblk0p1");
        assert_eq!(profile.boot_partition_offset, 2048);
        assert_eq!(profile.boot_partition_size, 65536);
        assert_eq!(profile.flash_controller, "a20");
        assert_eq!(profile.settle_delay_ms, 200);
    }

    #[test]
    fn test_from_toml_partial_override() {
        let profile = BurnProfile::from_toml(
            r#"
nand_device = "/tmp/fake-nand"
settle_delay_ms = 0
"#,
        )
        .unwrap();
        assert_eq!(profile.nand_device, "/tmp/fake-nand");
        assert_eq!(profile.settle_delay_ms, 0);
        // untouched fields keep the board defaults
        assert_eq!(profile.boot_device, "/dev/nanda");
        assert_eq!(profile.boot_partition_size, 65536);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(BurnProfile::from_toml("boot_partition_offset = \"lots\"").is_err());
    }

    #[test]
    fn test_load_profile_default_when_no_path() {
        let profile = load_profile(None).unwrap();
        assert_eq!(profile, BurnProfile::default());
    }
}
