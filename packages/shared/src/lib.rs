//! Utilities shared by the Kokuban crates.

pub mod logger;
pub mod time;
