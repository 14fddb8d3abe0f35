//! Error types for nandburn
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Device geometry errors
#[derive(Error, Debug)]
pub enum GeometryError {
    /// Sector count markers missing from the partition listing
    #[error("sector count not found in fdisk output (is the NAND driver loaded?)")]
    MarkerNotFound,

    /// Sector count did not parse as an integer
    #[error("invalid sector count '{value}'")]
    InvalidSectorCount {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Device has fewer sectors than the fixed boot region needs
    #[error("device too small: {total_sectors} sectors, root partition needs the device to be larger than {minimum} sectors")]
    DeviceTooSmall { total_sectors: u64, minimum: u64 },
}

/// Pipeline stage errors
#[derive(Error, Debug)]
pub enum StageError {
    /// External tool could not be spawned
    #[error("failed to launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Tool ran but its output lacked the expected success marker
    #[error("'{program}' did not report success (expected \"{marker}\" in its output)")]
    MarkerMissing { program: String, marker: String },

    /// Tool exited nonzero (strict mode only)
    #[error("'{program}' exited with status {status}")]
    ExitStatus { program: String, status: i32 },

    /// Filesystem side effect failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to list directory
    #[error("failed to list directory '{path}': {error}")]
    ListDir { path: PathBuf, error: String },

    /// Failed to remove directory entry
    #[error("failed to remove '{path}': {error}")]
    Remove { path: PathBuf, error: String },
}
