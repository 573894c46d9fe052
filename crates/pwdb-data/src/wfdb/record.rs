//! WFDB sample data (`.dat`) decoding

use std::fs;
use std::path::{Path, PathBuf};

use pwdb_core::prelude::*;

use super::header::{read_header, Header, SignalSpec, StorageFormat};

/// A single-segment record with every signal converted to physical units
///
/// Signals sampled several times per frame keep all their samples, so
/// `physical[i].len()` is the frame count times the signal's samples per
/// frame.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub frequency: f64,
    pub frame_count: usize,
    pub signals: Vec<SignalSpec>,
    pub physical: Vec<Vec<f64>>,
}

impl Record {
    /// Signal names with the trailing comma removed
    pub fn signal_names(&self) -> Vec<String> {
        self.signals.iter().map(|s| s.name().to_string()).collect()
    }

    /// Index of the signal described as `name`
    pub fn find_signal(&self, name: &str) -> Option<usize> {
        self.signals.iter().position(|s| s.name() == name)
    }

    /// Sampling interval of signal `index`, in seconds
    pub fn sample_interval(&self, index: usize) -> f64 {
        let spf = self.signals.get(index).map_or(1, |s| s.samples_per_frame);
        1.0 / (self.frequency * spf as f64)
    }
}

fn decode(format: StorageFormat, bytes: &[u8]) -> Vec<i32> {
    match format {
        StorageFormat::Le16 => bytes
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]) as i32)
            .collect(),
        StorageFormat::Be16 => bytes
            .chunks_exact(2)
            .map(|b| i16::from_be_bytes([b[0], b[1]]) as i32)
            .collect(),
        StorageFormat::Offset8 => bytes.iter().map(|b| *b as i32 - 128).collect(),
        StorageFormat::Packed12 => {
            let sign_extend = |v: i32| if v & 0x800 != 0 { v - 0x1000 } else { v };
            let mut samples = Vec::with_capacity(bytes.len() * 2 / 3 + 1);
            for chunk in bytes.chunks(3) {
                if chunk.len() < 2 {
                    break;
                }
                let (b0, b1) = (chunk[0] as i32, chunk[1] as i32);
                samples.push(sign_extend(b0 | ((b1 & 0x0F) << 8)));
                if let Some(b2) = chunk.get(2) {
                    samples.push(sign_extend(*b2 as i32 | ((b1 & 0xF0) << 4)));
                }
            }
            samples
        }
        StorageFormat::Le32 => bytes
            .chunks_exact(4)
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect(),
    }
}

fn to_physical(spec: &SignalSpec, digital: i32) -> f64 {
    if digital == spec.format.invalid_sample() {
        f64::NAN
    } else {
        (digital as f64 - spec.baseline as f64) / spec.adc_gain
    }
}

/// Decode the signals stored together in one data file
fn read_file_group(
    path: &Path,
    specs: &[&SignalSpec],
    frame_count: Option<usize>,
) -> Result<(usize, Vec<Vec<f64>>)> {
    let first = specs
        .first()
        .ok_or_else(|| Error::wfdb(path, "no signals stored in file"))?;
    if let Some(other) = specs.iter().find(|s| s.format != first.format) {
        return Err(Error::wfdb(
            path,
            format!("signal '{}' uses a different storage format", other.name()),
        ));
    }

    let bytes = fs::read(path).map_err(|e| Error::wfdb(path, format!("cannot read data: {e}")))?;
    let start = (first.byte_offset as usize).min(bytes.len());
    let samples = decode(first.format, &bytes[start..]);

    let frame_size: usize = specs.iter().map(|s| s.samples_per_frame).sum();
    let available = samples.len() / frame_size;
    let frames = match frame_count {
        Some(n) if n > available => {
            return Err(Error::wfdb(
                path,
                format!("header declares {n} frames but the file holds {available}"),
            ));
        }
        Some(n) => n,
        None => available,
    };

    let mut physical: Vec<Vec<f64>> = specs
        .iter()
        .map(|s| Vec::with_capacity(frames * s.samples_per_frame))
        .collect();

    for frame in 0..frames {
        let mut column = 0;
        for (spec, values) in specs.iter().zip(physical.iter_mut()) {
            let source = frame + spec.skew;
            for k in 0..spec.samples_per_frame {
                let value = if source < available {
                    to_physical(spec, samples[source * frame_size + column + k])
                } else {
                    f64::NAN
                };
                values.push(value);
            }
            column += spec.samples_per_frame;
        }
    }

    Ok((frames, physical))
}

/// Read the record whose header is `header_path`
pub fn read_record(header_path: &Path) -> Result<Record> {
    let header: Header = read_header(header_path)?;
    let dir = header_path.parent().unwrap_or(Path::new("."));

    // files in order of first use
    let mut files: Vec<&str> = Vec::new();
    for spec in &header.signals {
        if !files.contains(&spec.file_name.as_str()) {
            files.push(&spec.file_name);
        }
    }

    let mut physical = vec![Vec::new(); header.signals.len()];
    let mut frame_count = header.frame_count;
    for file in files {
        let indices: Vec<usize> = header
            .signals
            .iter()
            .enumerate()
            .filter(|(_, s)| s.file_name == file)
            .map(|(i, _)| i)
            .collect();
        let specs: Vec<&SignalSpec> = indices.iter().map(|i| &header.signals[*i]).collect();
        let data_path: PathBuf = dir.join(file);

        let (frames, values) = read_file_group(&data_path, &specs, frame_count)?;
        frame_count.get_or_insert(frames);
        for (index, signal) in indices.into_iter().zip(values) {
            physical[index] = signal;
        }
    }

    debug!(
        "Read record {} ({} signals, {} frames)",
        header.record_name,
        header.signals.len(),
        frame_count.unwrap_or(0)
    );

    Ok(Record {
        name: header.record_name,
        frequency: header.frequency,
        frame_count: frame_count.unwrap_or(0),
        signals: header.signals,
        physical,
    })
}
