//! Shared pieces of the Bloomex binaries

pub mod config;
pub mod display;
