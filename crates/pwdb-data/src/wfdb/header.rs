//! WFDB header (`.hea`) parsing
//!
//! ```text
//! pwdb_0001 3 500 487
//! pwdb_0001.dat 16x1 1000(0)/mmHg 16 0 -1 0 0 AorticRoot_P,
//! ```
//!
//! The record line carries the name, signal count, frame frequency and
//! length in frames. Each signal line carries the data file, storage
//! format (with optional samples per frame, skew and byte offset), gain
//! (with optional baseline and units), ADC resolution and zero, initial
//! value, checksum, block size and a free-text description.

use std::path::Path;
use std::sync::LazyLock;

use pwdb_core::prelude::*;
use regex::Regex;

/// `format[xspf][:skew][+offset]`
static FORMAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:x(\d+))?(?::(\d+))?(?:\+(\d+))?$").expect("Invalid format regex")
});

/// `gain[(baseline)][/units]`
static GAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)(?:\((-?\d+)\))?(?:/(\S+))?$")
        .expect("Invalid gain regex")
});

/// Frame frequency assumed when the header omits it
pub const DEFAULT_FREQUENCY: f64 = 250.0;

/// Gain assumed when the header omits it or records zero
pub const DEFAULT_GAIN: f64 = 200.0;

/// On-disk sample encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    /// 16-bit two's complement, little-endian
    Le16,
    /// 16-bit two's complement, big-endian
    Be16,
    /// 8-bit offset binary
    Offset8,
    /// Two 12-bit samples packed into three bytes
    Packed12,
    /// 32-bit two's complement, little-endian
    Le32,
}

impl StorageFormat {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            16 => Some(StorageFormat::Le16),
            61 => Some(StorageFormat::Be16),
            80 => Some(StorageFormat::Offset8),
            212 => Some(StorageFormat::Packed12),
            32 => Some(StorageFormat::Le32),
            _ => None,
        }
    }

    /// Digital value marking a missing sample
    pub fn invalid_sample(&self) -> i32 {
        match self {
            StorageFormat::Le16 | StorageFormat::Be16 => i16::MIN as i32,
            StorageFormat::Offset8 => i8::MIN as i32,
            StorageFormat::Packed12 => -2048,
            StorageFormat::Le32 => i32::MIN,
        }
    }
}

/// Description of one signal in a record
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSpec {
    pub file_name: String,
    pub format: StorageFormat,
    pub samples_per_frame: usize,
    pub skew: usize,
    pub byte_offset: u64,
    pub adc_gain: f64,
    pub baseline: i32,
    pub units: String,
    pub adc_resolution: Option<u32>,
    pub adc_zero: i32,
    pub initial_value: Option<i32>,
    pub checksum: Option<i32>,
    pub block_size: Option<u32>,
    pub description: String,
}

impl SignalSpec {
    /// Description without the trailing comma the PWDB export appends
    pub fn name(&self) -> &str {
        self.description.trim().trim_end_matches(',')
    }
}

/// Parsed record header
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub record_name: String,
    pub frequency: f64,
    /// Length in frames, when recorded
    pub frame_count: Option<usize>,
    pub signals: Vec<SignalSpec>,
}

fn parse_field<T: std::str::FromStr>(path: &Path, field: &str, what: &str) -> Result<T> {
    field
        .parse::<T>()
        .map_err(|_| Error::wfdb(path, format!("invalid {what} '{field}'")))
}

/// Split off up to `count` whitespace-separated fields, returning the rest
fn split_fields(line: &str, count: usize) -> (Vec<&str>, &str) {
    let mut fields = Vec::with_capacity(count);
    let mut rest = line.trim_start();
    while fields.len() < count && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    (fields, rest)
}

fn parse_record_line(path: &Path, line: &str) -> Result<(String, usize, f64, Option<usize>)> {
    let (fields, _) = split_fields(line, 4);
    let name = fields
        .first()
        .ok_or_else(|| Error::wfdb(path, "empty record line"))?;
    if name.contains('/') {
        return Err(Error::wfdb(path, "multi-segment records are not supported"));
    }
    let signal_count = fields
        .get(1)
        .map(|f| parse_field::<usize>(path, f, "signal count"))
        .transpose()?
        .ok_or_else(|| Error::wfdb(path, "record line has no signal count"))?;
    let frequency = match fields.get(2) {
        // counter frequency and base counter value follow a '/'
        Some(f) => parse_field::<f64>(path, f.split('/').next().unwrap_or_default(), "frequency")?,
        None => DEFAULT_FREQUENCY,
    };
    let frame_count = fields
        .get(3)
        .map(|f| parse_field::<usize>(path, f, "signal length"))
        .transpose()?
        .filter(|len| *len > 0);

    Ok((name.to_string(), signal_count, frequency, frame_count))
}

fn parse_signal_line(path: &Path, line: &str) -> Result<SignalSpec> {
    let (fields, description) = split_fields(line, 8);

    let file_name = fields
        .first()
        .ok_or_else(|| Error::wfdb(path, "empty signal line"))?
        .to_string();

    let format_field = fields
        .get(1)
        .ok_or_else(|| Error::wfdb(path, format!("signal in {file_name} has no format")))?;
    let caps = FORMAT_PATTERN
        .captures(format_field)
        .ok_or_else(|| Error::wfdb(path, format!("invalid format '{format_field}'")))?;
    let code: u32 = parse_field(path, &caps[1], "format")?;
    let format = StorageFormat::from_code(code)
        .ok_or_else(|| Error::wfdb(path, format!("unsupported storage format {code}")))?;
    let samples_per_frame = match caps.get(2) {
        Some(m) => parse_field::<usize>(path, m.as_str(), "samples per frame")?.max(1),
        None => 1,
    };
    let skew = match caps.get(3) {
        Some(m) => parse_field(path, m.as_str(), "skew")?,
        None => 0,
    };
    let byte_offset = match caps.get(4) {
        Some(m) => parse_field(path, m.as_str(), "byte offset")?,
        None => 0,
    };

    let adc_resolution = fields
        .get(3)
        .map(|f| parse_field(path, f, "ADC resolution"))
        .transpose()?;
    let adc_zero = fields
        .get(4)
        .map(|f| parse_field(path, f, "ADC zero"))
        .transpose()?
        .unwrap_or(0);
    let initial_value = fields
        .get(5)
        .map(|f| parse_field(path, f, "initial value"))
        .transpose()?;
    let checksum = fields
        .get(6)
        .map(|f| parse_field(path, f, "checksum"))
        .transpose()?;
    let block_size = fields
        .get(7)
        .map(|f| parse_field(path, f, "block size"))
        .transpose()?;

    let (adc_gain, baseline, units) = match fields.get(2) {
        Some(gain_field) => {
            let caps = GAIN_PATTERN
                .captures(gain_field)
                .ok_or_else(|| Error::wfdb(path, format!("invalid gain '{gain_field}'")))?;
            let gain: f64 = parse_field(path, &caps[1], "gain")?;
            let baseline = match caps.get(2) {
                Some(m) => parse_field(path, m.as_str(), "baseline")?,
                None => adc_zero,
            };
            let units = caps.get(3).map_or("mV", |m| m.as_str()).to_string();
            (gain, baseline, units)
        }
        None => (DEFAULT_GAIN, adc_zero, "mV".to_string()),
    };
    let adc_gain = if adc_gain == 0.0 { DEFAULT_GAIN } else { adc_gain };

    Ok(SignalSpec {
        file_name,
        format,
        samples_per_frame,
        skew,
        byte_offset,
        adc_gain,
        baseline,
        units,
        adc_resolution,
        adc_zero,
        initial_value,
        checksum,
        block_size,
        description: description.to_string(),
    })
}

/// Parse header text read from `path`
pub fn parse_header(path: &Path, text: &str) -> Result<Header> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let record_line = lines
        .next()
        .ok_or_else(|| Error::wfdb(path, "header has no record line"))?;
    let (record_name, signal_count, frequency, frame_count) = parse_record_line(path, record_line)?;

    let signals = lines
        .take(signal_count)
        .map(|line| parse_signal_line(path, line))
        .collect::<Result<Vec<_>>>()?;
    if signals.len() != signal_count {
        return Err(Error::wfdb(
            path,
            format!(
                "header declares {} signals but describes {}",
                signal_count,
                signals.len()
            ),
        ));
    }

    Ok(Header {
        record_name,
        frequency,
        frame_count,
        signals,
    })
}

/// Read and parse a `.hea` file
pub fn read_header(path: &Path) -> Result<Header> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::wfdb(path, format!("cannot read header: {e}")))?;
    parse_header(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PWDB_HEADER: &str = "\
# exported from the pulse wave database
pwdb_0001 3 500 4
pwdb_0001.dat 16 1000(0)/mmHg 16 0 -1 0 0 AorticRoot_P,
pwdb_0001.dat 16x2 100000/m/sec 16 0 0 0 0 AorticRoot_U,
pwdb_0001.dat 16 1e6(-5)/m2 16 0 0 0 0 MCA_A, combined
";

    #[test]
    fn test_parse_record_line() {
        let header = parse_header(Path::new("t.hea"), PWDB_HEADER).unwrap();
        assert_eq!(header.record_name, "pwdb_0001");
        assert_eq!(header.frequency, 500.0);
        assert_eq!(header.frame_count, Some(4));
        assert_eq!(header.signals.len(), 3);
    }

    #[test]
    fn test_parse_signal_fields() {
        let header = parse_header(Path::new("t.hea"), PWDB_HEADER).unwrap();
        let p = &header.signals[0];
        assert_eq!(p.file_name, "pwdb_0001.dat");
        assert_eq!(p.format, StorageFormat::Le16);
        assert_eq!(p.samples_per_frame, 1);
        assert_eq!(p.adc_gain, 1000.0);
        assert_eq!(p.baseline, 0);
        assert_eq!(p.units, "mmHg");
        assert_eq!(p.initial_value, Some(-1));
        assert_eq!(p.description, "AorticRoot_P,");
        assert_eq!(p.name(), "AorticRoot_P");

        let u = &header.signals[1];
        assert_eq!(u.samples_per_frame, 2);
        assert_eq!(u.units, "m/sec");

        let a = &header.signals[2];
        assert_eq!(a.adc_gain, 1e6);
        assert_eq!(a.baseline, -5);
        // free text keeps its inner spaces
        assert_eq!(a.description, "MCA_A, combined");
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let header = parse_header(Path::new("t.hea"), "rec 1\nrec.dat 212\n").unwrap();
        assert_eq!(header.frequency, DEFAULT_FREQUENCY);
        assert_eq!(header.frame_count, None);
        let s = &header.signals[0];
        assert_eq!(s.format, StorageFormat::Packed12);
        assert_eq!(s.adc_gain, DEFAULT_GAIN);
        assert_eq!(s.baseline, 0);
        assert_eq!(s.description, "");
    }

    #[test]
    fn test_zero_gain_uses_default() {
        let header =
            parse_header(Path::new("t.hea"), "rec 1 360\nrec.dat 16 0(3)/mV 12 3\n").unwrap();
        assert_eq!(header.signals[0].adc_gain, DEFAULT_GAIN);
        assert_eq!(header.signals[0].baseline, 3);
    }

    #[test]
    fn test_format_offset_and_skew() {
        let header = parse_header(Path::new("t.hea"), "rec 1\nrec.dat 16x4:2+512 200\n").unwrap();
        let s = &header.signals[0];
        assert_eq!(s.samples_per_frame, 4);
        assert_eq!(s.skew, 2);
        assert_eq!(s.byte_offset, 512);
    }

    #[test]
    fn test_counter_frequency_ignored() {
        let header = parse_header(Path::new("t.hea"), "rec 1 360/720(1) 10\nrec.dat 16\n").unwrap();
        assert_eq!(header.frequency, 360.0);
    }

    #[test]
    fn test_errors() {
        let path = Path::new("t.hea");
        assert!(parse_header(path, "").is_err());
        assert!(parse_header(path, "rec 2\nrec.dat 16\n").is_err());
        assert!(parse_header(path, "rec 1\nrec.dat 8\n").is_err());
        assert!(parse_header(path, "rec/2 1\nrec.dat 16\n").is_err());
        assert!(matches!(
            parse_header(path, "rec 1\nrec.dat 16 abc\n"),
            Err(Error::Wfdb { .. })
        ));
    }
}
