//! NAND geometry arithmetic
//!
//! The total sector count is scraped from `fdisk -l` free text; everything
//! else derives from the fixed boot region constants. Sizes are reported
//! in decimal megabytes (1000*1000 bytes), not MiB - the board's flashing
//! workflow depends on those exact figures.

use crate::config::defaults;
use crate::core::profile::BurnProfile;
use crate::error::GeometryError;

/// Resolved partition layout for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NandGeometry {
    /// Total sectors reported by the device
    pub total_sectors: u64,
    /// Boot partition start offset, in sectors
    pub boot_offset: u64,
    /// Boot partition size, in sectors
    pub boot_size: u64,
}

impl NandGeometry {
    /// Derive the layout from a queried sector count.
    ///
    /// Fails when the device cannot hold a root partition at all; the
    /// remainder after the boot region must be positive.
    pub fn resolve(total_sectors: u64, profile: &BurnProfile) -> Result<Self, GeometryError> {
        let minimum = profile.boot_partition_offset + profile.boot_partition_size;
        if total_sectors <= minimum {
            return Err(GeometryError::DeviceTooSmall {
                total_sectors,
                minimum,
            });
        }
        Ok(Self {
            total_sectors,
            boot_offset: profile.boot_partition_offset,
            boot_size: profile.boot_partition_size,
        })
    }

    /// Root partition start offset, in sectors
    pub fn root_offset(&self) -> u64 {
        self.boot_offset + self.boot_size
    }

    /// Root partition size, in sectors
    pub fn root_size(&self) -> u64 {
        self.total_sectors - self.root_offset()
    }

    /// Total device size in decimal megabytes
    pub fn total_megabytes(&self) -> f64 {
        sectors_to_megabytes(self.total_sectors)
    }

    /// Boot partition size in decimal megabytes
    pub fn boot_megabytes(&self) -> f64 {
        sectors_to_megabytes(self.boot_size)
    }

    /// Root partition size in decimal megabytes
    pub fn root_megabytes(&self) -> f64 {
        sectors_to_megabytes(self.root_size())
    }
}

/// Convert sectors to decimal megabytes
pub fn sectors_to_megabytes(sectors: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let bytes = (sectors * defaults::SECTOR_SIZE_BYTES) as f64;
    bytes / 1_000_000.0
}

/// Extract the total sector count from `fdisk -l` output.
///
/// The count sits between the fixed `", total "` and `" sectors"` markers.
/// Missing markers usually mean the driver is not loaded and fdisk printed
/// an error instead of a listing.
pub fn extract_total_sectors(listing: &str) -> Result<u64, GeometryError> {
    let start = listing
        .find(defaults::SECTOR_COUNT_PREFIX)
        .ok_or(GeometryError::MarkerNotFound)?
        + defaults::SECTOR_COUNT_PREFIX.len();
    let rest = &listing[start..];
    let end = rest
        .find(defaults::SECTOR_COUNT_SUFFIX)
        .ok_or(GeometryError::MarkerNotFound)?;
    let value = &rest[..end];
    value
        .parse()
        .map_err(|source| GeometryError::InvalidSectorCount {
            value: value.to_string(),
            source,
        })
}
