//! Discovery of PWDB record sets and signal-name consolidation
//!
//! A PWDB directory holds one simulation per CoW topology:
//!
//! ```text
//! <root>/<Topology>/pwdb_onset_times.csv
//! <root>/<Topology>/PWs/wfdb/pwdb_0001.hea
//! <root>/<Topology>/PWs/wfdb/pwdb_0001.dat
//! ```
//!
//! Every `PWs/wfdb` directory found becomes a [`RecordSet`]. Subjects are
//! matched across sets by position, so the n-th record of each set
//! belongs to the same virtual subject.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pwdb_core::prelude::*;
use pwdb_core::SignalName;
use walkdir::WalkDir;

use crate::table::OnsetTimes;
use crate::wfdb::Record;

/// Name of the per-topology onset table, two levels above `PWs/wfdb`
pub const ONSET_TIMES_FILE: &str = "pwdb_onset_times.csv";

/// Records of one topology
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub wfdb_dir: PathBuf,
    /// Topology directory name, used to label plotted series
    pub label: String,
    /// `pwdb*.dat` files, sorted
    pub records: Vec<PathBuf>,
    pub onsets: OnsetTimes,
}

impl RecordSet {
    pub fn load(wfdb_dir: &Path) -> Result<Self> {
        let topology_dir = wfdb_dir
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| Error::dataset(format!("{} has no topology dir", wfdb_dir.display())))?;
        let label = topology_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut records: Vec<PathBuf> = WalkDir::new(wfdb_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .filter(|path| is_record_data(path))
            .collect();
        records.sort();

        let onsets = OnsetTimes::load(&topology_dir.join(ONSET_TIMES_FILE))?;
        debug!(
            "Found {} records for {} in {}",
            records.len(),
            label,
            wfdb_dir.display()
        );

        Ok(Self {
            wfdb_dir: wfdb_dir.to_path_buf(),
            label,
            records,
            onsets,
        })
    }

    /// Header of the record at zero-based `subject`
    pub fn header_path(&self, subject: usize) -> Option<PathBuf> {
        self.records.get(subject).map(|p| p.with_extension("hea"))
    }
}

fn is_record_data(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with("pwdb") && path.extension().is_some_and(|ext| ext == "dat")
}

/// Every `PWs/wfdb` directory below `root`, sorted
pub fn find_wfdb_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::dataset(e.to_string()))?;
        if entry.file_type().is_dir() && entry.path().ends_with("PWs/wfdb") {
            dirs.push(entry.into_path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// All record sets found below the given roots, in root order
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sets: Vec<RecordSet>,
}

impl Dataset {
    pub fn discover(roots: &[PathBuf]) -> Result<Self> {
        let mut sets = Vec::new();
        for root in roots {
            for dir in find_wfdb_dirs(root)? {
                sets.push(RecordSet::load(&dir)?);
            }
        }

        if sets.first().map_or(true, |set| set.records.is_empty()) {
            return Err(Error::NoRecords);
        }
        info!("Discovered {} record sets", sets.len());
        Ok(Self { sets })
    }

    /// Subjects present in every set
    pub fn subject_count(&self) -> usize {
        self.sets.iter().map(|s| s.records.len()).min().unwrap_or(0)
    }

    /// Signal names of the first record of each set
    pub fn first_record_signal_names(&self) -> Result<Vec<Vec<String>>> {
        self.sets
            .iter()
            .map(|set| {
                let header = set.header_path(0).ok_or(Error::NoRecords)?;
                let header = crate::wfdb::read_header(&header)?;
                Ok(header.signals.iter().map(|s| s.name().to_string()).collect())
            })
            .collect()
    }
}

/// Index of `name` in `record`, falling back to the combined MCA signal
pub fn resolve_signal_index(record: &Record, name: &SignalName) -> Result<usize> {
    if let Some(index) = record.find_signal(&name.to_string()) {
        return Ok(index);
    }
    name.combined_mca()
        .and_then(|mca| record.find_signal(&mca.to_string()))
        .ok_or_else(|| Error::dataset(format!("record {} has no signal {}", record.name, name)))
}

/// Onset time of `name` for zero-based `subject`, with the same MCA fallback
pub fn signal_onset(onsets: &OnsetTimes, subject: usize, name: &SignalName) -> Result<f64> {
    if let Some(onset) = onsets.get(subject, &name.to_string())? {
        return Ok(onset);
    }
    if let Some(mca) = name.combined_mca() {
        if let Some(onset) = onsets.get(subject, &mca.to_string())? {
            return Ok(onset);
        }
    }
    Err(Error::dataset(format!(
        "{} has no onset column for {}",
        onsets.path().display(),
        name
    )))
}

/// Names missing from at least one of `lists`
pub fn non_common_elements(lists: &[Vec<String>]) -> BTreeSet<String> {
    let all: BTreeSet<&String> = lists.iter().flatten().collect();
    all.into_iter()
        .filter(|name| !lists.iter().all(|list| list.contains(name)))
        .cloned()
        .collect()
}

fn is_mca_variant_set(names: &BTreeSet<String>) -> bool {
    let has = |prefix: &str| names.iter().any(|n| n.starts_with(prefix));
    has("MCA_")
        && has("LMCA_")
        && has("RMCA_")
        && names
            .iter()
            .all(|n| n.starts_with("MCA_") || n.starts_with("LMCA_") || n.starts_with("RMCA_"))
}

/// Signal names to plot when none were selected explicitly
///
/// Names may differ between roots only by the MCA/LMCA/RMCA split; the
/// list of the first root recording left and right separately is used
/// then, and the combined signal stands in for the Complete topology.
pub fn consolidate_signal_names(lists: &[Vec<String>]) -> Result<Vec<String>> {
    let first = lists.first().ok_or(Error::NoRecords)?;
    if lists.len() == 1 || non_common_elements(lists).is_empty() {
        return Ok(first.clone());
    }

    for pair in lists.windows(2) {
        let differing = non_common_elements(pair);
        if !differing.is_empty() && !is_mca_variant_set(&differing) {
            return Err(Error::dataset(
                "All signal names are not consistent across pwdbdirs, specify some specific signals instead.",
            ));
        }
    }

    lists
        .iter()
        .find(|names| {
            names.iter().any(|n| n.starts_with("LMCA")) && names.iter().any(|n| n.starts_with("RMCA"))
        })
        .cloned()
        .ok_or_else(|| Error::dataset("no pwdbdir records LMCA and RMCA signals"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_topology(root: &Path, topology: &str, records: &[&str]) -> PathBuf {
        let wfdb = root.join(topology).join("PWs/wfdb");
        fs::create_dir_all(&wfdb).unwrap();
        for record in records {
            fs::write(wfdb.join(record), b"").unwrap();
        }
        fs::write(
            root.join(topology).join(ONSET_TIMES_FILE),
            "Subject, MCA_P, AorticRoot_P\n1, 0.2, 0.0\n",
        )
        .unwrap();
        wfdb
    }

    #[test]
    fn test_discover_sorted_sets_and_records() {
        let root = TempDir::new().unwrap();
        make_topology(
            root.path(),
            "PCoA",
            &["pwdb_0002.dat", "pwdb_0001.dat", "pwdb_0001.hea", "other.dat"],
        );
        make_topology(root.path(), "Complete", &["pwdb_0001.dat"]);

        let dataset = Dataset::discover(&[root.path().to_path_buf()]).unwrap();
        let labels: Vec<&str> = dataset.sets.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Complete", "PCoA"]);

        let pcoa = &dataset.sets[1];
        let files: Vec<String> = pcoa
            .records
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, vec!["pwdb_0001.dat", "pwdb_0002.dat"]);
        assert_eq!(dataset.subject_count(), 1);
        assert_eq!(
            pcoa.header_path(1).unwrap(),
            pcoa.wfdb_dir.join("pwdb_0002.hea")
        );
    }

    #[test]
    fn test_discover_without_records() {
        let root = TempDir::new().unwrap();
        assert!(matches!(
            Dataset::discover(&[root.path().to_path_buf()]),
            Err(Error::NoRecords)
        ));
        make_topology(root.path(), "Complete", &[]);
        assert!(matches!(
            Dataset::discover(&[root.path().to_path_buf()]),
            Err(Error::NoRecords)
        ));
    }

    #[test]
    fn test_onset_falls_back_to_combined_mca() {
        let root = TempDir::new().unwrap();
        make_topology(root.path(), "Complete", &["pwdb_0001.dat"]);
        let set = RecordSet::load(&root.path().join("Complete/PWs/wfdb")).unwrap();

        let lmca: SignalName = "LMCA_P".parse().unwrap();
        assert_eq!(signal_onset(&set.onsets, 0, &lmca).unwrap(), 0.2);
        let brachial: SignalName = "Brachial_P".parse().unwrap();
        assert!(matches!(
            signal_onset(&set.onsets, 0, &brachial),
            Err(Error::Dataset { .. })
        ));
    }

    #[test]
    fn test_non_common_elements() {
        let lists = vec![
            names(&["A_P", "MCA_P"]),
            names(&["A_P", "LMCA_P", "RMCA_P"]),
            names(&["A_P", "LMCA_P", "RMCA_P"]),
        ];
        let nc: Vec<String> = non_common_elements(&lists).into_iter().collect();
        assert_eq!(nc, names(&["LMCA_P", "MCA_P", "RMCA_P"]));
    }

    #[test]
    fn test_consolidate_single_root_uses_all() {
        let lists = vec![names(&["AorticRoot_P", "MCA_U"])];
        assert_eq!(consolidate_signal_names(&lists).unwrap(), lists[0]);
    }

    #[test]
    fn test_consolidate_prefers_split_mca_names() {
        let complete = names(&["AorticRoot_P", "MCA_P"]);
        let variant = names(&["AorticRoot_P", "LMCA_P", "RMCA_P"]);
        let lists = vec![complete, variant.clone(), variant.clone()];
        assert_eq!(consolidate_signal_names(&lists).unwrap(), variant);
    }

    #[test]
    fn test_consolidate_rejects_other_differences() {
        let lists = vec![
            names(&["AorticRoot_P", "MCA_P"]),
            names(&["AorticRoot_P", "Radial_P", "LMCA_P", "RMCA_P"]),
        ];
        assert!(matches!(
            consolidate_signal_names(&lists),
            Err(Error::Dataset { .. })
        ));
    }
}
