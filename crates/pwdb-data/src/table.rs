//! Tabular inputs: model segments, geometry segments and onset times

use std::path::{Path, PathBuf};

use pwdb_core::prelude::*;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

/// One arterial segment of a topology model (`*_model.txt`, tab separated)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelSegment {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Inlet node", deserialize_with = "node_id")]
    pub inlet_node: u32,

    #[serde(rename = "Outlet node", deserialize_with = "node_id")]
    pub outlet_node: u32,

    #[serde(rename = "Length [m]")]
    pub length: f64,
}

/// One arterial segment of a simulated geometry (`pwdb_geo_*.csv`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoSegment {
    #[serde(deserialize_with = "node_id")]
    pub inlet_node: u32,

    #[serde(deserialize_with = "node_id")]
    pub outlet_node: u32,

    pub length: f64,
}

/// Node ids are written either as integers or as integral floats
fn node_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("invalid node id {value}")))
    }
}

fn read_table<T: DeserializeOwned>(path: &Path, delimiter: u8) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::table(path, e.to_string()))?;

    let rows = reader
        .deserialize::<T>()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| Error::table(path, e.to_string()))?;

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load a tab-separated topology model
pub fn load_model(path: &Path) -> Result<Vec<ModelSegment>> {
    read_table(path, b'\t')
}

/// Load a comma-separated geometry table
pub fn load_geometry(path: &Path) -> Result<Vec<GeoSegment>> {
    read_table(path, b',')
}

/// Per-subject pulse onset times, one column per signal
#[derive(Debug, Clone)]
pub struct OnsetTimes {
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl OnsetTimes {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| Error::table(path, e.to_string()))?;

        let columns = reader
            .headers()
            .map_err(|e| Error::table(path, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::table(path, e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subject_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Onset of `column` for the subject at zero-based `row`
    ///
    /// Returns `Ok(None)` when the table has no such column.
    pub fn get(&self, row: usize, column: &str) -> Result<Option<f64>> {
        let Some(index) = self.columns.iter().position(|c| c == column) else {
            return Ok(None);
        };
        let record = self.rows.get(row).ok_or_else(|| {
            Error::table(&self.path, format!("no onset times for subject row {row}"))
        })?;
        let raw = record.get(index).unwrap_or_default();
        raw.parse::<f64>().map(Some).map_err(|_| {
            Error::table(
                &self.path,
                format!("invalid onset '{raw}' in column {column}, row {row}"),
            )
        })
    }
}
