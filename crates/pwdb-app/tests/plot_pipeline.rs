//! Plan and build a figure from a small on-disk PWDB tree

use std::fs;
use std::path::{Path, PathBuf};

use pwdb_app::{build_panes, plan, Figure, PlotOptions, Settings, SignalSelection};
use pwdb_core::{parse_signal_list, parse_subjects, Error};
use tempfile::TempDir;

/// Write one format-16 record with gain 1 and 10 Hz sampling
fn write_record(wfdb: &Path, name: &str, signals: &[(&str, &[i16])]) {
    let frames = signals[0].1.len();
    let mut header = format!("{name} {} 10 {frames}\n", signals.len());
    for (signal, _) in signals {
        header.push_str(&format!("{name}.dat 16 1(0)/mmHg 16 0 0 0 0 {signal},\n"));
    }
    fs::write(wfdb.join(format!("{name}.hea")), header).unwrap();

    let mut data = Vec::new();
    for frame in 0..frames {
        for (_, values) in signals {
            data.extend(values[frame].to_le_bytes());
        }
    }
    fs::write(wfdb.join(format!("{name}.dat")), data).unwrap();
}

fn write_topology(root: &Path, topology: &str, onsets: &str, signals: &[(&str, &[i16])]) {
    let wfdb = root.join(topology).join("PWs/wfdb");
    fs::create_dir_all(&wfdb).unwrap();
    fs::write(root.join(topology).join("pwdb_onset_times.csv"), onsets).unwrap();
    write_record(&wfdb, "pwdb_0001", signals);
    write_record(&wfdb, "pwdb_0002", signals);
}

fn sample_tree() -> TempDir {
    let root = TempDir::new().unwrap();
    write_topology(
        root.path(),
        "Complete",
        "Subject, AorticRoot_P, MCA_P\n1, 0.0, 0.0\n2, 0.0, 0.1\n",
        &[("AorticRoot_P", &[1, 2, 3, 0]), ("MCA_P", &[5, 6, 7, 8])],
    );
    write_topology(
        root.path(),
        "ACoA",
        "Subject, AorticRoot_P, LMCA_P, RMCA_P\n1, 0.0, 0.0, 0.0\n2, 0.0, 0.0, 0.0\n",
        &[
            ("AorticRoot_P", &[1, 2, 3, 4]),
            ("LMCA_P", &[9, 9, 9, 9]),
            ("RMCA_P", &[4, 4, 4, 4]),
        ],
    );
    root
}

fn options(root: &Path) -> PlotOptions {
    PlotOptions {
        pwdb_dirs: vec![root.to_path_buf()],
        ..Default::default()
    }
}

fn signal_names(plan: &pwdb_app::PlotPlan) -> Vec<String> {
    plan.signals.iter().map(ToString::to_string).collect()
}

#[test]
fn test_all_signals_prefer_split_mca() {
    let root = sample_tree();
    let plan = plan(&options(root.path()), &Settings::default()).unwrap();

    let labels: Vec<&str> = plan.dataset.sets.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["ACoA", "Complete"]);
    assert_eq!(signal_names(&plan), vec!["AorticRoot_P", "LMCA_P", "RMCA_P"]);
    assert!(plan.path.is_none());
}

#[test]
fn test_build_one_pane_per_subject_and_signal() {
    let root = sample_tree();
    let options = options(root.path());
    let settings = Settings::default();
    let plan = plan(&options, &settings).unwrap();

    let mut figure = Figure::new();
    let panes = build_panes(&plan, &options, &settings, &mut figure).unwrap();
    assert_eq!(panes.len(), 6);

    let first = figure.pane(panes[0]).unwrap();
    assert_eq!(first.title, "pwdb_0001: AorticRoot_P (Ascending Aorta)");
    assert_eq!(first.x_label, "Time (s)");
    assert_eq!(first.y_label, "mmHg");
    assert!(first.grid && first.legend);

    let labels: Vec<&str> = first.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["ACoA", "Complete"]);
    // trailing zero dropped from the Complete record
    assert_eq!(first.series[1].points, vec![(0.0, 1.0), (0.1, 2.0), (0.2, 3.0)]);

    let lmca = figure.pane(panes[1]).unwrap();
    assert_eq!(
        lmca.title,
        "pwdb_0001: LMCA_P (LeftMiddleCerebralArtery(M1))"
    );
    // Complete stands in with its combined MCA signal
    let complete: Vec<f64> = lmca.series[1].points.iter().map(|(_, v)| *v).collect();
    assert_eq!(complete, vec![5.0, 6.0, 7.0, 8.0]);
}

#[test]
fn test_onset_shift_wraps_to_zero() {
    let root = sample_tree();
    let options = PlotOptions {
        signals: Some(parse_signal_list("LMCA_P").unwrap()),
        subjects: Some(parse_subjects("2").unwrap()),
        ..options(root.path())
    };
    let settings = Settings::default();
    let plan = plan(&options, &settings).unwrap();

    let mut figure = Figure::new();
    let panes = build_panes(&plan, &options, &settings, &mut figure).unwrap();
    assert_eq!(panes.len(), 1);

    let pane = figure.pane(panes[0]).unwrap();
    assert!(pane.title.starts_with("pwdb_0002: "));
    // Complete MCA onset of 0.1 s moves the last sample to the front
    let values: Vec<f64> = pane.series[1].points.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![8.0, 5.0, 6.0, 7.0]);
    assert!(pane.series[1].points[0].0.abs() < 1e-9);
}

#[test]
fn test_sites_with_configured_types() {
    let root = sample_tree();
    let options = PlotOptions {
        sites: Some(pwdb_core::parse_site_list("Ascending Aorta").unwrap()),
        types: Some(pwdb_core::parse_signal_types("P, U").unwrap()),
        ..options(root.path())
    };
    let plan = plan(&options, &Settings::default()).unwrap();
    assert_eq!(signal_names(&plan), vec!["AorticRoot_P", "AorticRoot_U"]);
}

#[test]
fn test_path_selection_traces_model() {
    let root = sample_tree();
    let model = root.path().join("model.txt");
    fs::write(
        &model,
        "Name\tInlet node\tOutlet node\tLength [m]\n\
         Ascending Aorta\t1\t2\t0.04\n\
         Aortic Arch I\t2\t3\t0.02\n\
         Left Common Carotid Artery\t3\t4\t0.1\n",
    )
    .unwrap();

    let options = PlotOptions {
        path: Some("LCCA".to_string()),
        model: Some(model),
        types: Some(pwdb_core::parse_signal_types("P").unwrap()),
        ..options(root.path())
    };
    let plan = plan(&options, &Settings::default()).unwrap();

    assert_eq!(signal_names(&plan), vec!["AorticRoot_P", "LCCA_P"]);
    assert_eq!(plan.path.as_ref().map(Vec::len), Some(3));
}

#[test]
fn test_missing_model_reported_before_discovery() {
    let options = PlotOptions {
        pwdb_dirs: vec![PathBuf::from("/nonexistent")],
        path: Some("Radial".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        SignalSelection::from_options(&options),
        Err(Error::MissingModel { .. })
    ));
    assert!(matches!(
        plan(&options, &Settings::default()),
        Err(Error::MissingModel { .. })
    ));
}

#[test]
fn test_empty_tree_has_no_records() {
    let root = TempDir::new().unwrap();
    assert!(matches!(
        plan(&options(root.path()), &Settings::default()),
        Err(Error::NoRecords)
    ));
}
