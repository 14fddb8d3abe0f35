//! Core business logic
//!
//! Geometry arithmetic, preflight checks, tool output classification and
//! the burn pipeline itself. External tools are reached only through the
//! [`runner::ToolRunner`] seam so tests can substitute fakes.

pub mod burn;
pub mod geometry;
pub mod preflight;
pub mod profile;
pub mod runner;
pub mod stages;
