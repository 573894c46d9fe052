//! Crosscheck topology models against simulated geometries
//!
//! Every CoW topology has a model table (`pwdb_v2/Input Data/*_model.txt`)
//! and a directory of simulation output whose geometry table should
//! describe the same network. A directory whose geometry matches a
//! different model was simulated under the wrong name; with renaming
//! enabled it is moved to the name of the model it matches, in two
//! phases so that swapped directories do not collide:
//!
//! 1. `K2` → `K2_renamed_K1` for every mismatched geometry `K2` matching model `K1`
//! 2. every `*_renamed_K1` → `K1`

use std::fs;
use std::path::{Path, PathBuf};

use pwdb_core::prelude::*;
use pwdb_core::Topology;

use crate::table::{load_geometry, load_model, GeoSegment, ModelSegment};

/// Separator inserted between the old and new names during renaming
pub const RENAME_MARKER: &str = "_renamed_";

/// Model and geometry tables of every topology, in [`Topology::ALL`] order
#[derive(Debug, Clone, Default)]
pub struct TopologyTables {
    pub models: Vec<(Topology, Vec<ModelSegment>)>,
    pub geometries: Vec<(Topology, Vec<GeoSegment>)>,
}

impl TopologyTables {
    /// Load all tables below a dataset root
    pub fn load(root: &Path) -> Result<Self> {
        let mut tables = Self::default();
        for topology in Topology::ALL {
            let model = load_model(&topology.model_path(root))?;
            let geometry = load_geometry(&topology.geometry_path(root))?;
            tables.models.push((topology, model));
            tables.geometries.push((topology, geometry));
        }
        Ok(tables)
    }
}

/// A model table found identical to a geometry table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyMatch {
    pub model: Topology,
    pub geometry: Topology,
}

impl TopologyMatch {
    pub fn is_mismatch(&self) -> bool {
        self.model != self.geometry
    }
}

impl std::fmt::Display for TopologyMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "models[{}] <== geos[{}]", self.model, self.geometry)
    }
}

/// A directory move performed while renaming
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Same segment count and identical inlet, outlet and length columns
pub fn model_matches_geometry(model: &[ModelSegment], geometry: &[GeoSegment]) -> bool {
    model.len() == geometry.len()
        && model.iter().zip(geometry).all(|(m, g)| {
            m.inlet_node == g.inlet_node && m.outlet_node == g.outlet_node && m.length == g.length
        })
}

/// Compare every model with every geometry, model-major
pub fn crosscheck(tables: &TopologyTables) -> Vec<TopologyMatch> {
    let mut matches = Vec::new();
    for (model_topology, model) in &tables.models {
        for (geo_topology, geometry) in &tables.geometries {
            if model_matches_geometry(model, geometry) {
                let found = TopologyMatch {
                    model: *model_topology,
                    geometry: *geo_topology,
                };
                debug!("{}", found);
                matches.push(found);
            }
        }
    }
    matches
}

/// Phase 1: move each mismatched geometry directory aside
pub fn mark_mismatches(root: &Path, matches: &[TopologyMatch]) -> Result<Vec<Rename>> {
    let mut renames = Vec::new();
    for found in matches.iter().filter(|m| m.is_mismatch()) {
        let from = root.join(found.geometry.dir_name());
        let to = root.join(format!(
            "{}{}{}",
            found.geometry.dir_name(),
            RENAME_MARKER,
            found.model.dir_name()
        ));
        info!("Moving {} to {}", from.display(), to.display());
        fs::rename(&from, &to)?;
        renames.push(Rename { from, to });
    }
    Ok(renames)
}

/// Phase 2: give every marked directory the name of the model it matches
pub fn finish_renames(root: &Path) -> Result<Vec<Rename>> {
    let mut marked: Vec<(PathBuf, String)> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let (_, target) = name.split_once(RENAME_MARKER)?;
            Some((entry.path(), target.to_string()))
        })
        .collect();
    marked.sort();

    let mut renames = Vec::new();
    for (from, target) in marked {
        let to = root.join(target);
        fs::rename(&from, &to)?;
        renames.push(Rename { from, to });
    }
    Ok(renames)
}
