//! `pwdb` subcommands
//!
//! - `crosscheck` - Compare topology models with simulated geometries
//! - `plot` - Plot waveforms across subjects and topologies

pub mod crosscheck;
pub mod plot;
