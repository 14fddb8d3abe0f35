//! Nandburn - NAND flash provisioning for sunxi A20 boards
//!
//! This library provides the core functionality for provisioning the raw
//! NAND device of an A20 board: bootloader write, boot/root partitioning,
//! filesystem creation and distribution transfer from removable media.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (geometry, preflight, the burn pipeline)
//! - [`infra`] - Infrastructure layer (process spawning, filesystem)
//! - [`config`] - Fixed board constants and tool output markers
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
