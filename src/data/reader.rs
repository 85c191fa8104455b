use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use rand::rngs::StdRng;

use super::format::{Dataset, RecordError};
use super::model::{Example, Label, Partition, ReadStats};
use super::partition::{carve_cv_slice, init_weights, random_split, FoldPlan};
use crate::error::IngestError;

const PROGRESS_EVERY: usize = 10_000;

// ---------------------------------------------------------------------------
// Per-file reading
// ---------------------------------------------------------------------------

/// Read one input file through the per-format parser.
///
/// Empty lines and records the parser drops are counted as skipped; an
/// out-of-vocabulary label on a strict format aborts the read. Zero parsed
/// examples is fatal, which keeps the downstream weight initialization away
/// from a division by zero.
pub fn read_examples(
    path: &Path,
    dataset: Dataset,
) -> Result<(Vec<Example>, ReadStats), IngestError> {
    let file = File::open(path).map_err(|source| IngestError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    info!("Reading {dataset} data from {}", path.display());

    let mut examples = Vec::new();
    let mut stats = ReadStats::default();
    for line in reader.lines() {
        let line = line.map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        stats.lines += 1;

        if line.is_empty() {
            stats.skipped += 1;
            continue;
        }

        match dataset.parse_line(&line) {
            Ok(example) => {
                examples.push(example);
                stats.parsed += 1;
            }
            Err(RecordError::Skip(reason)) => {
                debug!("line {}: record dropped ({reason})", stats.lines);
                stats.skipped += 1;
            }
            Err(RecordError::BadLabel(label)) => {
                return Err(IngestError::UnexpectedLabel { dataset, label });
            }
        }

        if stats.lines % PROGRESS_EVERY == 0 {
            info!(
                "Processed {} lines, parsed {} examples",
                stats.lines, stats.parsed
            );
        }
    }

    if examples.is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    info!(
        "Read {} lines: {} parsed, {} skipped ({:.1}% success)",
        stats.lines,
        stats.parsed,
        stats.skipped,
        stats.success_rate()
    );
    log_label_distribution(&examples);
    info!("Features per example: {}", examples[0].values.len());

    Ok((examples, stats))
}

fn log_label_distribution(examples: &[Example]) {
    let positive = examples
        .iter()
        .filter(|ex| ex.label == Label::Positive)
        .count();
    let negative = examples.len() - positive;
    let pct = |count: usize| 100.0 * count as f64 / examples.len() as f64;
    info!(
        "Label distribution: {} positive ({:.1}%), {} negative ({:.1}%)",
        positive,
        pct(positive),
        negative,
        pct(negative)
    );
}

fn log_split_summary(partition: &Partition) {
    info!(
        "Split: {} train, {} cv, {} test ({} examples, {} features)",
        partition.train.len(),
        partition.cv.len(),
        partition.test.len(),
        partition.len(),
        partition.num_features()
    );
}

// ---------------------------------------------------------------------------
// Ingestion modes
// ---------------------------------------------------------------------------

/// Single-file mode: read, then shuffle / noise / fold-route / weight-init.
pub fn load_random_split(
    path: &Path,
    dataset: Dataset,
    plan: &FoldPlan,
    rng: &mut StdRng,
) -> Result<Partition, IngestError> {
    let (examples, _stats) = read_examples(path, dataset)?;
    let partition = random_split(examples, plan, rng);
    log_split_summary(&partition);
    Ok(partition)
}

/// Two-file mode: train and test are loaded independently, neither is
/// fold-routed, and the test set is never shuffled or weighted. With more
/// than one fold a cv slice is carved out of train afterwards.
pub fn load_standard_split(
    train_path: &Path,
    test_path: &Path,
    dataset: Dataset,
    num_folds: usize,
    rng: &mut StdRng,
) -> Result<Partition, IngestError> {
    let (mut train, _train_stats) = read_examples(train_path, dataset)?;
    let (test, _test_stats) = read_examples(test_path, dataset)?;

    init_weights(&mut train);
    let cv = carve_cv_slice(&mut train, num_folds, rng);
    if !cv.is_empty() {
        info!("Carved cv set of {} examples out of the training data", cv.len());
    }

    let partition = Partition { train, cv, test };
    log_split_summary(&partition);
    Ok(partition)
}
