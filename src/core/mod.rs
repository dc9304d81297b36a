//! Core infrastructure for bundle assembly
//!
//! Configuration, platform selection, terminal output, and the pipeline that
//! ties the helpers together.

pub mod cleanup;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod platform;
