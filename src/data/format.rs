use std::fmt;

use clap::ValueEnum;

use super::adult;
use super::model::{Example, Label};

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Split a raw line on `sep`, dropping empty fields.
///
/// Consecutive and leading separators produce no tokens. This absorbs
/// genuinely missing middle fields on some formats, but the behavior is a
/// compatibility contract with the existing data files and must not change.
pub fn split_fields(line: &str, sep: char) -> Vec<&str> {
    line.split(sep).filter(|token| !token.is_empty()).collect()
}

/// C-style numeric cast: take the longest leading float prefix of the field,
/// reading anything unparsable as 0.0. Never rejects a record.
pub(crate) fn numeric(field: &str) -> f32 {
    let s = field.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(&b'+') | Some(&b'-')) {
        end += 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let first_exp_digit = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > first_exp_digit {
            end = exp;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Per-record outcomes
// ---------------------------------------------------------------------------

/// Why one record did not become an example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Drop the record and keep reading.
    Skip(SkipReason),
    /// Label outside the format's vocabulary on a format with no skip
    /// escape; aborts the whole ingestion.
    BadLabel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingValue,
    UnknownLabel,
    FieldCount,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingValue => write!(f, "missing value"),
            SkipReason::UnknownLabel => write!(f, "unrecognized label"),
            SkipReason::FieldCount => write!(f, "unexpected field count"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the closed format registry
// ---------------------------------------------------------------------------

/// Supported dataset formats. Each variant fixes the field delimiter, the
/// label vocabulary, and implicitly the feature-vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Dataset {
    /// Wisconsin breast cancer: ID column, 9 features, labels 2 (benign)
    /// and 4 (malignant).
    #[value(name = "breastcancer")]
    BreastCancer,
    /// Wisconsin prognostic breast cancer: ID column, then an N/R outcome
    /// label in the second column.
    Wpbc,
    /// Radar returns, labels b (bad) and g (good) in the last column.
    Ionosphere,
    /// German credit, space-separated, labels 1 (good) and 2 (bad).
    German,
    /// Princeton OCR digits 1 vs 7, space-separated.
    Ocr17,
    /// Princeton OCR digits 4 vs 9, space-separated.
    Ocr49,
    /// MNIST-derived OCR digits 1 vs 7, comma-separated.
    #[value(name = "ocr17-mnist")]
    Ocr17Mnist,
    /// MNIST-derived OCR digits 4 vs 9, comma-separated.
    #[value(name = "ocr49-mnist")]
    Ocr49Mnist,
    /// Pima Indians diabetes, labels 0 and 1.
    Diabetes,
    /// Census income: 6 numeric transforms + 8 categorical encodings,
    /// labels <=50K and >50K.
    Adult,
    /// Raw MNIST pixels, digits 0 vs 1, 784 pixel fields plus the label.
    Mnist17,
}

impl Dataset {
    /// Field delimiter of the on-disk format.
    pub fn separator(self) -> char {
        match self {
            Dataset::German | Dataset::Ocr17 | Dataset::Ocr49 => ' ',
            _ => ',',
        }
    }

    /// Parse one raw line into an example, or say why not.
    pub fn parse_line(self, line: &str) -> Result<Example, RecordError> {
        match self {
            Dataset::BreastCancer => parse_breastcancer(line),
            Dataset::Wpbc => parse_wpbc(line),
            Dataset::Ionosphere => parse_last_column(line, self.separator(), true, |t| match t {
                "b" => Some(Label::Negative),
                "g" => Some(Label::Positive),
                _ => None,
            }),
            Dataset::German => parse_last_column(line, self.separator(), true, |t| match t {
                "1" => Some(Label::Negative),
                "2" => Some(Label::Positive),
                _ => None,
            }),
            Dataset::Ocr17 | Dataset::Ocr17Mnist => {
                parse_last_column(line, self.separator(), false, ocr17_label)
            }
            Dataset::Ocr49 | Dataset::Ocr49Mnist => {
                parse_last_column(line, self.separator(), false, ocr49_label)
            }
            Dataset::Diabetes => parse_last_column(line, self.separator(), true, |t| match t {
                "0" => Some(Label::Negative),
                "1" => Some(Label::Positive),
                _ => None,
            }),
            Dataset::Adult => adult::parse_line(line),
            Dataset::Mnist17 => parse_mnist17(line),
        }
    }

    /// Canonical name as used on the command line and in logs.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::BreastCancer => "breastcancer",
            Dataset::Wpbc => "wpbc",
            Dataset::Ionosphere => "ionosphere",
            Dataset::German => "german",
            Dataset::Ocr17 => "ocr17",
            Dataset::Ocr49 => "ocr49",
            Dataset::Ocr17Mnist => "ocr17-mnist",
            Dataset::Ocr49Mnist => "ocr49-mnist",
            Dataset::Diabetes => "diabetes",
            Dataset::Adult => "adult",
            Dataset::Mnist17 => "mnist17",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn ocr17_label(token: &str) -> Option<Label> {
    match token {
        "1" => Some(Label::Negative),
        "7" => Some(Label::Positive),
        _ => None,
    }
}

fn ocr49_label(token: &str) -> Option<Label> {
    match token {
        "4" => Some(Label::Negative),
        "9" => Some(Label::Positive),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Registry profiles
// ---------------------------------------------------------------------------

/// The two mutually exclusive registry configurations. They differ on the
/// census formats: `standard` carries `adult` and allows the two-file
/// standard split, `mnist` carries `mnist17` and is single-file only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Registry {
    Standard,
    Mnist,
}

impl Registry {
    pub fn supports(self, dataset: Dataset) -> bool {
        match dataset {
            Dataset::Adult => self == Registry::Standard,
            Dataset::Mnist17 => self == Registry::Mnist,
            _ => true,
        }
    }

    pub fn allows_standard_split(self) -> bool {
        self == Registry::Standard
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registry::Standard => write!(f, "standard"),
            Registry::Mnist => write!(f, "mnist"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsers
// ---------------------------------------------------------------------------

/// Formats whose last field is the label and whose remaining fields are
/// plain numerics. `strict` escalates an out-of-vocabulary label to a fatal
/// error instead of dropping the record.
fn parse_last_column(
    line: &str,
    sep: char,
    strict: bool,
    label_of: impl Fn(&str) -> Option<Label>,
) -> Result<Example, RecordError> {
    let fields = split_fields(line, sep);
    let (label_field, rest) = fields
        .split_last()
        .ok_or(RecordError::Skip(SkipReason::FieldCount))?;
    let label = match label_of(label_field) {
        Some(label) => label,
        None if strict => return Err(RecordError::BadLabel((*label_field).to_string())),
        None => return Err(RecordError::Skip(SkipReason::UnknownLabel)),
    };
    let values = rest.iter().map(|field| numeric(field)).collect();
    Ok(Example::new(label, values))
}

fn parse_breastcancer(line: &str) -> Result<Example, RecordError> {
    let fields = split_fields(line, ',');
    let last = fields.len().saturating_sub(1);
    let mut label = None;
    let mut values = Vec::with_capacity(fields.len().saturating_sub(2));
    for (i, field) in fields.iter().enumerate() {
        if i == 0 {
            continue; // ID column
        } else if i == last {
            label = Some(match *field {
                "2" => Label::Negative, // benign
                "4" => Label::Positive, // malignant
                other => return Err(RecordError::BadLabel(other.to_string())),
            });
        } else if *field == "?" {
            return Err(RecordError::Skip(SkipReason::MissingValue));
        } else {
            values.push(numeric(field));
        }
    }
    let label = label.ok_or(RecordError::Skip(SkipReason::FieldCount))?;
    Ok(Example::new(label, values))
}

fn parse_wpbc(line: &str) -> Result<Example, RecordError> {
    let fields = split_fields(line, ',');
    let mut label = None;
    let mut values = Vec::with_capacity(fields.len().saturating_sub(2));
    for (i, field) in fields.iter().enumerate() {
        if i == 0 {
            continue; // ID column
        } else if i == 1 {
            label = Some(match *field {
                "N" => Label::Negative, // no recurrence
                "R" => Label::Positive, // recurrence
                other => return Err(RecordError::BadLabel(other.to_string())),
            });
        } else if *field == "?" {
            return Err(RecordError::Skip(SkipReason::MissingValue));
        } else {
            values.push(numeric(field));
        }
    }
    let label = label.ok_or(RecordError::Skip(SkipReason::FieldCount))?;
    Ok(Example::new(label, values))
}

/// Number of pixel fields in one raw MNIST record, before the label.
const MNIST_PIXELS: usize = 784;

fn parse_mnist17(line: &str) -> Result<Example, RecordError> {
    let fields = split_fields(line, ',');
    if fields.len() != MNIST_PIXELS + 1 {
        return Err(RecordError::Skip(SkipReason::FieldCount));
    }
    let label = match fields[MNIST_PIXELS] {
        "0" => Label::Negative,
        "1" => Label::Positive,
        _ => return Err(RecordError::Skip(SkipReason::UnknownLabel)),
    };
    let values = fields[..MNIST_PIXELS]
        .iter()
        .map(|field| numeric(field) / 255.0)
        .collect();
    Ok(Example::new(label, values))
}
