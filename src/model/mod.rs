//! Command-line arguments and configuration

pub mod arg;
pub mod config;
