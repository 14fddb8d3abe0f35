//! Infrastructure layer
//!
//! Real process spawning and filesystem side effects, kept behind small
//! seams so the core logic stays testable without touching devices.

pub mod filesystem;
pub mod process;
