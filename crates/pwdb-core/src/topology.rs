//! Circle-of-Willis topological variants

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Directory holding the v2 model input tables
pub const MODEL_INPUT_DIR: &str = "pwdb_v2/Input Data";

/// One Circle-of-Willis configuration of the arterial network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topology {
    Complete,
    AcaA1,
    AcoA,
    PcaP1,
    PcoA,
    PcoaPcaP1,
    PcoAs,
}

impl Topology {
    /// Complete first, then the variants sorted by directory name
    pub const ALL: [Topology; 7] = [
        Topology::Complete,
        Topology::AcaA1,
        Topology::AcoA,
        Topology::PcaP1,
        Topology::PcoA,
        Topology::PcoaPcaP1,
        Topology::PcoAs,
    ];

    /// Directory name of this topology under the dataset root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Topology::Complete => "Complete",
            Topology::AcaA1 => "ACA_A1",
            Topology::AcoA => "ACoA",
            Topology::PcaP1 => "PCA_P1",
            Topology::PcoA => "PCoA",
            Topology::PcoaPcaP1 => "PCoA_PCA_P1",
            Topology::PcoAs => "PCoAs",
        }
    }

    /// Model table describing this topology
    pub fn model_file(&self) -> &'static str {
        match self {
            Topology::Complete => "Healty_model.txt",
            Topology::AcaA1 => "Missing_ACAA1_model.txt",
            Topology::AcoA => "Missing_ACoA_model.txt",
            Topology::PcaP1 => "Missing_PCAP1_model.txt",
            Topology::PcoA => "Missing_PCoA_model.txt",
            Topology::PcoaPcaP1 => "Missing_PCoAandPCAP1_model.txt",
            Topology::PcoAs => "Missing_PCoAs_model.txt",
        }
    }

    pub fn model_path(&self, root: &Path) -> PathBuf {
        root.join(MODEL_INPUT_DIR).join(self.model_file())
    }

    /// Geometry table of the first subject simulated with this topology
    pub fn geometry_path(&self, root: &Path) -> PathBuf {
        root.join(self.dir_name()).join("geo").join("pwdb_geo_0001.csv")
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.dir_name() == s)
            .ok_or_else(|| Error::dataset(format!("Unknown topology '{s}'")))
    }
}
