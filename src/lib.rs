//! PWDB tools library
//!
//! Command implementations behind the `pwdb` binary. Each command writes
//! its report to the given writer so it can be exercised without a
//! terminal.

pub mod commands;

// Re-export main entry points
pub use commands::{crosscheck, plot};
