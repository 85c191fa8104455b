use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::format::Dataset;

/// Fatal ingestion failures. Per-record problems stay inside the reader
/// loop and only show up in the skipped counters; the exception is an
/// out-of-vocabulary label on one of the strict formats, which escalates
/// to `UnexpectedLabel`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error while reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no examples parsed from {path}")]
    EmptyDataset { path: PathBuf },

    #[error("unexpected label '{label}' in {dataset} data")]
    UnexpectedLabel { dataset: Dataset, label: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}
