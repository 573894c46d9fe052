//! Signal vocabulary and command-line list parsing
//!
//! Signals are named `<prefix>_<type>`, e.g. `Radial_P` for the pressure
//! at the radial artery. Lists on the command line are comma separated;
//! whitespace around items is ignored and duplicates are dropped while
//! keeping the first occurrence.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sites;

/// Kind of simulated waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    /// Pressure
    P,
    /// Flow velocity
    U,
    /// Luminal area
    A,
    /// Volumetric flow
    Q,
    /// Photoplethysmogram
    Ppg,
}

impl SignalType {
    pub const ALL: [SignalType; 5] = [
        SignalType::P,
        SignalType::U,
        SignalType::A,
        SignalType::Q,
        SignalType::Ppg,
    ];

    /// Types plotted when none are requested
    pub const DEFAULTS: [SignalType; 4] =
        [SignalType::P, SignalType::U, SignalType::A, SignalType::Ppg];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::P => "P",
            SignalType::U => "U",
            SignalType::A => "A",
            SignalType::Q => "Q",
            SignalType::Ppg => "PPG",
        }
    }

    /// Physical units of the exported waveform
    pub fn units(&self) -> &'static str {
        match self {
            SignalType::P => "mmHg",
            SignalType::U => "m/sec",
            SignalType::A => "m2",
            SignalType::Q => "m3/sec",
            SignalType::Ppg => "au",
        }
    }

    fn expected_list() -> String {
        let names: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
        format!("[{}]", names.join(", "))
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownSignalType {
                name: s.to_string(),
                expected: Self::expected_list(),
            })
    }
}

/// A validated `<prefix>_<type>` signal name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignalName {
    prefix: String,
    kind: SignalType,
}

impl SignalName {
    pub fn new(prefix: impl Into<String>, kind: SignalType) -> Self {
        Self {
            prefix: prefix.into(),
            kind,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn kind(&self) -> SignalType {
        self.kind
    }

    /// Anatomical site the prefix refers to
    pub fn site(&self) -> Result<&'static str> {
        sites::site_name(&self.prefix)
    }

    /// Name of the combined `MCA_*` signal for `LMCA_*`/`RMCA_*` names
    ///
    /// The Complete topology records one middle cerebral artery signal
    /// where the variants record left and right separately.
    pub fn combined_mca(&self) -> Option<SignalName> {
        matches!(self.prefix.as_str(), "LMCA" | "RMCA").then(|| SignalName::new("MCA", self.kind))
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix, self.kind)
    }
}

impl FromStr for SignalName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownSignal {
            name: s.to_string(),
        };
        let (prefix, suffix) = s.split_once('_').ok_or_else(unknown)?;
        if suffix.contains('_') {
            return Err(unknown());
        }
        sites::site_name(prefix).map_err(|_| unknown())?;
        let kind = suffix.parse::<SignalType>().map_err(|_| unknown())?;
        Ok(SignalName::new(prefix, kind))
    }
}

/// Comma-separated signal names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalList(pub Vec<SignalName>);

/// Comma-separated anatomical site names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteList(pub Vec<String>);

/// Comma-separated signal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTypeList(pub Vec<SignalType>);

/// 1-based subject numbers, sorted and unique
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectSet(BTreeSet<u32>);

impl SubjectSet {
    pub fn contains(&self, subject: u32) -> bool {
        self.0.contains(&subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for SubjectSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn comma_items(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim)
}

fn dedup_keep_first<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

/// Parse `"Radial_U,Brachial_U"`
pub fn parse_signal_list(value: &str) -> Result<SignalList> {
    let names = comma_items(value)
        .map(str::parse::<SignalName>)
        .collect::<Result<Vec<_>>>()?;
    Ok(SignalList(dedup_keep_first(names)))
}

/// Parse `"LEIA,RICA"`
pub fn parse_site_list(value: &str) -> Result<SiteList> {
    let sites = comma_items(value)
        .map(|site| sites::signal_prefix(site).map(|_| site.to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(SiteList(dedup_keep_first(sites)))
}

/// Parse a single signal prefix such as `"Digital"`
pub fn parse_signal_prefix(value: &str) -> Result<String> {
    sites::site_name(value)?;
    Ok(value.to_string())
}

/// Parse `"P,U,PPG"`
pub fn parse_signal_types(value: &str) -> Result<SignalTypeList> {
    let types = comma_items(value)
        .map(str::parse::<SignalType>)
        .collect::<Result<Vec<_>>>()?;
    Ok(SignalTypeList(dedup_keep_first(types)))
}

/// Largest number of subjects a single `start-end` range may cover
pub const MAX_SUBJECT_RANGE: u32 = 100_000;

/// Parse `"0,2-4,7,10-12"` into a sorted set of subject numbers
pub fn parse_subjects(value: &str) -> Result<SubjectSet> {
    let mut subjects = BTreeSet::new();

    for part in value.split(',') {
        if part.contains('-') {
            let bounds: Vec<&str> = part.split('-').map(str::trim).collect();
            let range = match bounds.as_slice() {
                [start, end] => start.parse::<u32>().ok().zip(end.parse::<u32>().ok()),
                _ => None,
            };
            let (start, end) = range.ok_or_else(|| Error::InvalidSubjects {
                message: format!("Invalid range format '{part}'. Expected format: 'start-end'"),
            })?;
            if end.saturating_sub(start) >= MAX_SUBJECT_RANGE {
                return Err(Error::InvalidSubjects {
                    message: format!(
                        "Range '{part}' covers more than {MAX_SUBJECT_RANGE} subjects"
                    ),
                });
            }
            subjects.extend(start..=end);
        } else {
            let subject = part
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidSubjects {
                    message: format!("Invalid subject index '{part}'. Expected an integer."),
                })?;
            subjects.insert(subject);
        }
    }

    Ok(SubjectSet(subjects))
}
