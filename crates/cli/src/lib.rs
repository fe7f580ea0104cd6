//! # Curriculum CLI
//!
//! Command implementations for the `curriculum` binary.

pub mod commands;
