/// Data layer: example model, per-format parsers, and partitioning.
///
/// Architecture:
/// ```text
///  flat file (one record per line)
///        │
///        ▼
///   ┌──────────┐
///   │  reader   │  line loop, parse/skip accounting
///   └──────────┘
///        │ Dataset::parse_line
///        ▼
///   ┌──────────┐
///   │ Example   │  label ∈ {−1,+1}, feature vector, weight
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ partition │  shuffle → label noise → fold routing → weights
///   └───────────┘
/// ```
pub mod format;
pub mod model;
pub mod partition;
pub mod reader;

mod adult;
