//! CLI library components for the DICOM metadata toolkit.

pub mod cli;
pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
