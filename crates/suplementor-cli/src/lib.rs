//! CLI library components for the supplement comparison tool.

pub mod cli;
pub mod config;
pub mod logging;
