//! Minimal reader for single-segment WFDB records
//!
//! Covers what the PWDB export uses: one header per record, one or more
//! data files, and the common fixed-width storage formats.

pub mod header;
pub mod record;

pub use header::{parse_header, read_header, Header, SignalSpec, StorageFormat};
pub use record::{read_record, Record};
