//! # pwdb-core - Core Domain Types
//!
//! Foundation crate for the PWDB tools. Provides error handling, logging,
//! the site/signal vocabulary of the Pulse Wave Database, Circle-of-Willis
//! topologies, and waveform clean-up.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` and `usage` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Vocabulary (`sites`, `signal`, `topology`)
//! - [`SignalName`], [`SignalType`] - `<prefix>_<type>` signal names
//! - [`sites::site_name()`], [`sites::signal_prefix()`] - v2/v1 site lookups
//! - [`Topology`] - Circle-of-Willis variants and their table locations
//!
//! ### Waveforms (`waveform`)
//! - [`trim_signal()`] - Drop NaN and zero-padded tails
//! - [`align_to_onset()`] - Shift a beat by its onset and wrap to t = 0
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use pwdb_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod signal;
pub mod sites;
pub mod topology;
pub mod waveform;

/// Prelude for common imports used throughout all PWDB crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use signal::{
    parse_signal_list, parse_signal_prefix, parse_signal_types, parse_site_list, parse_subjects,
    SignalList, SignalName, SignalType, SignalTypeList, SiteList, SubjectSet,
};
pub use topology::Topology;
pub use waveform::{align_to_onset, trim_signal, TrimmedSignal};
