//! Plot planning and figure building
//!
//! Planning turns command-line options into the list of signals to plot;
//! building reads the records subject by subject and adds one pane per
//! (subject, signal) to a [`Figure`], overlaying every topology found.

use std::path::PathBuf;

use pwdb_core::prelude::*;
use pwdb_core::{
    align_to_onset, sites, trim_signal, SignalList, SignalName, SignalType, SignalTypeList,
    SiteList, SubjectSet,
};
use pwdb_data::dataset::{resolve_signal_index, signal_onset};
use pwdb_data::{
    consolidate_signal_names, load_model, read_record, trace_path, Dataset, PathStep, Record,
};

use crate::config::Settings;
use crate::figure::{Figure, GridCell, PaneId};

/// Options of the `plot` command
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    pub pwdb_dirs: Vec<PathBuf>,
    pub verbose: u8,
    pub signals: Option<SignalList>,
    pub sites: Option<SiteList>,
    pub types: Option<SignalTypeList>,
    pub subjects: Option<SubjectSet>,
    /// Signal prefix to trace from the aortic root
    pub path: Option<String>,
    pub model: Option<PathBuf>,
    pub query: bool,
    pub dir: Option<PathBuf>,
    pub batch: bool,
}

/// How the plotted signals are chosen, in order of precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalSelection {
    Signals(Vec<SignalName>),
    Path { prefix: String, model: PathBuf },
    Sites(Vec<String>),
    All,
}

impl SignalSelection {
    pub fn from_options(options: &PlotOptions) -> Result<Self> {
        if let Some(SignalList(signals)) = &options.signals {
            return Ok(SignalSelection::Signals(signals.clone()));
        }
        if let Some(prefix) = &options.path {
            let model = options.model.clone().ok_or_else(|| Error::MissingModel {
                prefix: prefix.clone(),
            })?;
            return Ok(SignalSelection::Path {
                prefix: prefix.clone(),
                model,
            });
        }
        if let Some(SiteList(sites)) = &options.sites {
            return Ok(SignalSelection::Sites(sites.clone()));
        }
        Ok(SignalSelection::All)
    }
}

/// Everything needed to build the figure
#[derive(Debug, Clone)]
pub struct PlotPlan {
    pub dataset: Dataset,
    pub signals: Vec<SignalName>,
    /// Traced arterial path, when selected with `--path`
    pub path: Option<Vec<PathStep>>,
}

fn names_for_prefixes<'a>(
    prefixes: impl IntoIterator<Item = &'a str>,
    types: &[SignalType],
) -> Vec<SignalName> {
    prefixes
        .into_iter()
        .flat_map(|prefix| types.iter().map(move |t| SignalName::new(prefix, *t)))
        .collect()
}

/// Resolve the signal list against the dataset
pub fn plan(options: &PlotOptions, settings: &Settings) -> Result<PlotPlan> {
    // a bad selection is reported before any file is touched
    let selection = SignalSelection::from_options(options)?;
    let dataset = Dataset::discover(&options.pwdb_dirs)?;

    let types: &[SignalType] = match &options.types {
        Some(SignalTypeList(types)) => types,
        None => &settings.plot.types,
    };

    let mut path = None;
    let signals = match selection {
        SignalSelection::Signals(signals) => signals,
        SignalSelection::Path { prefix, model } => {
            let model = load_model(&model)?;
            let steps = trace_path(&model, &prefix)?;
            let prefixes = steps.iter().filter_map(|s| s.prefix.as_deref());
            let names = names_for_prefixes(prefixes, types);
            path = Some(steps);
            names
        }
        SignalSelection::Sites(site_names) => {
            let prefixes = site_names
                .iter()
                .map(|site| sites::signal_prefix(site))
                .collect::<Result<Vec<_>>>()?;
            names_for_prefixes(prefixes, types)
        }
        SignalSelection::All => {
            let lists = dataset.first_record_signal_names()?;
            consolidate_signal_names(&lists)?
                .iter()
                .map(|name| name.parse::<SignalName>())
                .collect::<Result<Vec<_>>>()?
        }
    };

    debug!("Plotting {} signals", signals.len());
    Ok(PlotPlan {
        dataset,
        signals,
        path,
    })
}

/// Time/value points of one record signal, trimmed and aligned to its onset
pub fn signal_points(record: &Record, index: usize, onset: f64) -> Result<Vec<(f64, f64)>> {
    let raw = record
        .physical
        .get(index)
        .ok_or_else(|| Error::signal(format!("record {} has no signal {}", record.name, index)))?;
    let trimmed = trim_signal(raw)
        .with_context(|| format!("trimming signal {} of {}", index, record.name))?;
    if trimmed.nans_removed > 0 || trimmed.zeros_removed > 0 {
        debug!(
            "{}: trimmed {} NaN and {} zero samples",
            record.name, trimmed.nans_removed, trimmed.zeros_removed
        );
    }
    Ok(align_to_onset(
        &trimmed.values,
        record.sample_interval(index),
        onset,
        raw.len(),
    ))
}

/// Add one pane per selected (subject, signal) to `figure`, in plotting order
pub fn build_panes(
    plan: &PlotPlan,
    options: &PlotOptions,
    settings: &Settings,
    figure: &mut Figure,
) -> Result<Vec<PaneId>> {
    let mut panes = Vec::new();

    for subject in 0..plan.dataset.subject_count() {
        let number = u32::try_from(subject + 1).unwrap_or(u32::MAX);
        if let Some(wanted) = &options.subjects {
            if !wanted.is_empty() && !wanted.contains(number) {
                continue;
            }
        }

        let records = plan
            .dataset
            .sets
            .iter()
            .map(|set| {
                let header = set.header_path(subject).ok_or(Error::NoRecords)?;
                read_record(&header)
            })
            .collect::<Result<Vec<_>>>()?;
        let Some(first) = records.first() else {
            continue;
        };

        for signal in &plan.signals {
            debug!("plotting {}", signal);
            let pane = figure.add_axes(GridCell::FULL);
            let Some(axes) = figure.pane_mut(pane) else {
                continue;
            };
            axes.title = format!("{}: {} ({})", first.name, signal, signal.site()?);

            for (set, record) in plan.dataset.sets.iter().zip(&records) {
                debug!("plotting {}", set.wfdb_dir.join(&record.name).display());
                let index = resolve_signal_index(record, signal)?;
                let onset = signal_onset(&set.onsets, subject, signal)?;
                trace!("{}: onset_time[{}] = {}", record.name, signal, onset);
                axes.plot(set.label.clone(), signal_points(record, index, onset)?);
            }

            axes.x_label = "Time (s)".to_string();
            axes.y_label = signal.kind().units().to_string();
            axes.grid = settings.ui.grid;
            axes.legend = settings.ui.legend;
            panes.push(pane);
        }
    }

    info!("Built {} panes", panes.len());
    Ok(panes)
}
