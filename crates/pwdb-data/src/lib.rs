//! # pwdb-data - PWDB File Access
//!
//! Reads everything the tools consume from a Pulse Wave Database export:
//! topology model and geometry tables, per-subject onset times, and WFDB
//! records. Also hosts the table-level algorithms that need no display:
//! model/geometry crosscheck and arterial path tracing.

pub mod crosscheck;
pub mod dataset;
pub mod path;
pub mod table;
pub mod wfdb;

pub use crosscheck::{crosscheck, TopologyMatch, TopologyTables};
pub use dataset::{consolidate_signal_names, Dataset, RecordSet};
pub use path::{trace_path, PathStep};
pub use table::{load_geometry, load_model, GeoSegment, ModelSegment, OnsetTimes};
pub use wfdb::{read_record, Record};
