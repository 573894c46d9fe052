//! Waveform clean-up and onset alignment
//!
//! Exported beats sometimes end in a few NaN samples or in a run of zero
//! padding. Both are cut before plotting. Beats are then shifted by the
//! pulse onset time and rotated so that every plot starts at t = 0.

use crate::error::{Error, Result};
use tracing::debug;

/// Longest NaN tail accepted before the beat is considered corrupt
pub const MAX_TRAILING_NANS: usize = 16;

/// Longest run of zero padding accepted before the beat is considered corrupt
pub const MAX_TRAILING_ZEROS: usize = 100;

/// A beat with its invalid tail removed
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedSignal {
    pub values: Vec<f64>,
    pub nans_removed: usize,
    pub zeros_removed: usize,
}

/// Remove everything from the first NaN, then trailing zeros
///
/// A signal made only of zeros is kept as is.
pub fn trim_signal(values: &[f64]) -> Result<TrimmedSignal> {
    let mut len = values.len();

    let mut nans_removed = 0;
    if let Some(first_nan) = values.iter().position(|v| v.is_nan()) {
        nans_removed = len - first_nan;
        debug!(
            "detected nan at index {}, sig_len = {}, trimming by {}",
            first_nan, len, nans_removed
        );
        if nans_removed > MAX_TRAILING_NANS {
            return Err(Error::signal(format!(
                "{nans_removed} trailing NaN samples (limit {MAX_TRAILING_NANS})"
            )));
        }
        len = first_nan;
    }

    let kept = &values[..len];
    let trailing_zeros = kept.iter().rev().take_while(|v| **v == 0.0).count();
    let zeros_removed = if trailing_zeros == kept.len() {
        0
    } else {
        trailing_zeros
    };
    if zeros_removed > 0 {
        debug!(
            "detected 0 at index {}, sig_len = {}, trimming by {}",
            len - zeros_removed,
            len,
            zeros_removed
        );
        if zeros_removed > MAX_TRAILING_ZEROS {
            return Err(Error::signal(format!(
                "{zeros_removed} trailing zero samples (limit {MAX_TRAILING_ZEROS})"
            )));
        }
        len -= zeros_removed;
    }

    Ok(TrimmedSignal {
        values: values[..len].to_vec(),
        nans_removed,
        zeros_removed,
    })
}

/// Place a beat on a time axis starting at its onset, wrapped into `[0, span)`
///
/// `cycle_samples` is the untrimmed beat length, which defines the cardiac
/// cycle used to fold onsets that lie beyond one cycle.
pub fn align_to_onset(values: &[f64], dt: f64, onset: f64, cycle_samples: usize) -> Vec<(f64, f64)> {
    let cycle_duration = cycle_samples as f64 * dt;
    let mut onset = onset;
    if onset >= cycle_duration {
        debug!(
            "wrapping onset_time = {}, cardiac_cycle_duration = {}",
            onset, cycle_duration
        );
        onset -= cycle_duration;
    }

    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| (onset + i as f64 * dt, *v));

    if onset <= 0.0 {
        return points.collect();
    }

    let span = values.len() as f64 * dt;
    let (wrapped, in_range): (Vec<_>, Vec<_>) = points.partition(|(t, _)| *t >= span);
    wrapped
        .into_iter()
        .map(|(t, v)| (t - span, v))
        .chain(in_range)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_clean_signal_untouched() {
        let trimmed = trim_signal(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(trimmed.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(trimmed.nans_removed, 0);
        assert_eq!(trimmed.zeros_removed, 0);
    }

    #[test]
    fn test_trim_nan_then_zero_tail() {
        let trimmed = trim_signal(&[1.0, 2.0, 0.0, 0.0, f64::NAN]).unwrap();
        assert_eq!(trimmed.values, vec![1.0, 2.0]);
        assert_eq!(trimmed.nans_removed, 1);
        assert_eq!(trimmed.zeros_removed, 2);
    }

    #[test]
    fn test_trim_cuts_from_first_nan() {
        let trimmed = trim_signal(&[1.0, f64::NAN, 3.0, f64::NAN]).unwrap();
        assert_eq!(trimmed.values, vec![1.0]);
        assert_eq!(trimmed.nans_removed, 3);
    }

    #[test]
    fn test_trim_all_zero_signal_kept() {
        let trimmed = trim_signal(&[0.0; 200]).unwrap();
        assert_eq!(trimmed.values.len(), 200);
        assert_eq!(trimmed.zeros_removed, 0);
    }

    #[test]
    fn test_trim_limits() {
        let mut long_nan_tail = vec![1.0; 10];
        long_nan_tail.extend([f64::NAN; 17]);
        assert!(matches!(trim_signal(&long_nan_tail), Err(Error::Signal { .. })));

        let mut long_zero_tail = vec![1.0; 10];
        long_zero_tail.extend([0.0; 101]);
        assert!(matches!(trim_signal(&long_zero_tail), Err(Error::Signal { .. })));

        let mut max_zero_tail = vec![1.0; 10];
        max_zero_tail.extend([0.0; 100]);
        assert_eq!(trim_signal(&max_zero_tail).unwrap().values.len(), 10);
    }

    #[test]
    fn test_align_zero_onset_is_identity_axis() {
        let points = align_to_onset(&[5.0, 6.0, 7.0], 0.5, 0.0, 3);
        assert_eq!(points, vec![(0.0, 5.0), (0.5, 6.0), (1.0, 7.0)]);
    }

    #[test]
    fn test_align_positive_onset_rotates_tail_to_front() {
        // span = 4 * 1.0; onset 1.5 pushes the last sample to t = 4.5 -> 0.5
        let points = align_to_onset(&[10.0, 11.0, 12.0, 13.0], 1.0, 1.5, 4);
        assert_eq!(
            points,
            vec![(0.5, 13.0), (1.5, 10.0), (2.5, 11.0), (3.5, 12.0)]
        );
    }

    #[test]
    fn test_align_onset_beyond_cycle_is_folded() {
        // cycle = 4 samples * 1.0s, onset 5.0 folds to 1.0
        let points = align_to_onset(&[1.0, 2.0, 3.0, 4.0], 1.0, 5.0, 4);
        assert_eq!(points[0], (0.0, 4.0));
        assert_eq!(points[1], (1.0, 1.0));
    }

    #[test]
    fn test_align_uses_trimmed_span_for_wrap() {
        // untrimmed cycle of 6 samples, only 4 kept after trimming
        let points = align_to_onset(&[1.0, 2.0, 3.0, 4.0], 1.0, 2.0, 6);
        let times: Vec<f64> = points.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
