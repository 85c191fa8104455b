use std::fmt;

// ---------------------------------------------------------------------------
// Label – binary class of one example
// ---------------------------------------------------------------------------

/// Binary label. Every parser maps its format's label vocabulary onto this;
/// no other class value can exist once a record has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// The −1 class.
    Negative,
    /// The +1 class.
    Positive,
}

impl Label {
    /// Signed value used by the downstream weighted training objective.
    pub fn sign(self) -> f32 {
        match self {
            Label::Negative => -1.0,
            Label::Positive => 1.0,
        }
    }

    /// Invert the class, used by label-noise injection.
    pub fn flip(self) -> Self {
        match self {
            Label::Negative => Label::Positive,
            Label::Positive => Label::Negative,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Negative => write!(f, "-1"),
            Label::Positive => write!(f, "+1"),
        }
    }
}

// ---------------------------------------------------------------------------
// Example – one labeled, weighted feature vector
// ---------------------------------------------------------------------------

/// One parsed record: a label, a fixed-length feature vector, and a training
/// weight. The weight is meaningful only while the example sits in the
/// training partition; it stays 0 on cv/test members.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub label: Label,
    pub values: Vec<f32>,
    pub weight: f32,
}

impl Example {
    pub fn new(label: Label, values: Vec<f32>) -> Self {
        Example {
            label,
            values,
            weight: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Partition – the train / cv / test split handed to collaborators
// ---------------------------------------------------------------------------

/// The three ordered example sequences produced by one ingestion run.
///
/// In random-split mode every parsed example lands in exactly one of the
/// three. In standard-split mode train and test are loaded independently
/// and cv, if present, is carved out of train.
#[derive(Debug, Default)]
pub struct Partition {
    pub train: Vec<Example>,
    pub cv: Vec<Example>,
    pub test: Vec<Example>,
}

impl Partition {
    /// Total number of examples across all three sequences.
    pub fn len(&self) -> usize {
        self.train.len() + self.cv.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature-vector length, taken from the first example found.
    pub fn num_features(&self) -> usize {
        self.train
            .first()
            .or_else(|| self.cv.first())
            .or_else(|| self.test.first())
            .map_or(0, |ex| ex.values.len())
    }
}

// ---------------------------------------------------------------------------
// ReadStats – per-file parse accounting
// ---------------------------------------------------------------------------

/// Counters kept while reading one input file. Skipped covers empty lines
/// and records dropped by the per-format parser.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub parsed: usize,
    pub skipped: usize,
}

impl ReadStats {
    /// Fraction of input lines that produced an example, in percent.
    pub fn success_rate(&self) -> f64 {
        if self.lines == 0 {
            0.0
        } else {
            100.0 * self.parsed as f64 / self.lines as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_flip_is_involutive() {
        assert_eq!(Label::Negative.flip(), Label::Positive);
        assert_eq!(Label::Positive.flip(), Label::Negative);
        assert_eq!(Label::Positive.flip().flip(), Label::Positive);
    }

    #[test]
    fn label_signs() {
        assert_eq!(Label::Negative.sign(), -1.0);
        assert_eq!(Label::Positive.sign(), 1.0);
    }

    #[test]
    fn partition_counts_all_members() {
        let ex = |v: f32| Example::new(Label::Positive, vec![v]);
        let partition = Partition {
            train: vec![ex(1.0), ex(2.0)],
            cv: vec![ex(3.0)],
            test: vec![ex(4.0)],
        };
        assert_eq!(partition.len(), 4);
        assert_eq!(partition.num_features(), 1);
        assert!(!partition.is_empty());
    }

    #[test]
    fn success_rate_handles_empty_input() {
        assert_eq!(ReadStats::default().success_rate(), 0.0);
        let stats = ReadStats {
            lines: 4,
            parsed: 3,
            skipped: 1,
        };
        assert_eq!(stats.success_rate(), 75.0);
    }
}
