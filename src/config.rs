use std::path::PathBuf;

use clap::Parser;

use crate::data::format::{Dataset, Registry};
use crate::data::partition::FoldPlan;
use crate::error::IngestError;

// ---------------------------------------------------------------------------
// Configuration surface
// ---------------------------------------------------------------------------

/// Ingestion configuration. Passing `--test-filename` switches from
/// single-file random-split mode to the two-file standard split.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "boostprep",
    version,
    about = "Prepare flat-file datasets for boosted-classifier training"
)]
pub struct Config {
    /// Dataset format of the input file.
    #[arg(long, value_enum, default_value_t = Dataset::Adult)]
    pub data_set: Dataset,

    /// Input data file; the training file in standard-split mode.
    #[arg(long, default_value = "./testdata/adult/adult.data")]
    pub data_filename: PathBuf,

    /// Optional test file; presence selects standard-split mode.
    #[arg(long)]
    pub test_filename: Option<PathBuf>,

    /// Fold count: (F-2)/F of the data trains, 1/F cross-validates, 1/F
    /// tests. In standard-split mode any value above 1 carves a 1/F cv
    /// slice out of the training file.
    #[arg(long, default_value_t = 5)]
    pub num_folds: usize,

    /// Zero-indexed fold held out for cross-validation.
    #[arg(long, default_value_t = 0)]
    pub fold_to_cv: usize,

    /// Zero-indexed fold held out for testing.
    #[arg(long, default_value_t = 1)]
    pub fold_to_test: usize,

    /// Probability of flipping an example's label during partitioning.
    #[arg(long, default_value_t = 0.0)]
    pub noise_prob: f64,

    /// Seed for the shuffle and label-noise generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Format registry to run against.
    #[arg(long, value_enum, default_value_t = Registry::Standard)]
    pub registry: Registry,
}

impl Config {
    /// Whether the two-file standard split is selected.
    pub fn standard_split(&self) -> bool {
        self.test_filename.is_some()
    }

    pub fn fold_plan(&self) -> FoldPlan {
        FoldPlan {
            num_folds: self.num_folds,
            fold_to_cv: self.fold_to_cv,
            fold_to_test: self.fold_to_test,
            noise_prob: self.noise_prob,
        }
    }

    /// Cross-field constraints that clap cannot express on its own.
    pub fn validate(&self) -> Result<(), IngestError> {
        if !self.registry.supports(self.data_set) {
            return Err(IngestError::Config(format!(
                "data set '{}' is not available in the {} registry",
                self.data_set, self.registry
            )));
        }
        if !(0.0..=1.0).contains(&self.noise_prob) {
            return Err(IngestError::Config(format!(
                "noise_prob must lie in [0, 1], got {}",
                self.noise_prob
            )));
        }

        if self.standard_split() {
            if !self.registry.allows_standard_split() {
                return Err(IngestError::Config(format!(
                    "the {} registry has no standard-split mode",
                    self.registry
                )));
            }
            if self.num_folds == 0 {
                return Err(IngestError::Config(
                    "num_folds must be at least 1".to_string(),
                ));
            }
        } else {
            if self.num_folds < 3 {
                return Err(IngestError::Config(format!(
                    "num_folds must be at least 3 in random-split mode, got {}",
                    self.num_folds
                )));
            }
            if self.fold_to_cv >= self.num_folds || self.fold_to_test >= self.num_folds {
                return Err(IngestError::Config(format!(
                    "fold indices must lie in [0, {}), got cv={} test={}",
                    self.num_folds, self.fold_to_cv, self.fold_to_test
                )));
            }
            if self.fold_to_cv == self.fold_to_test {
                return Err(IngestError::Config(
                    "fold_to_cv and fold_to_test must differ".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            data_set: Dataset::Ionosphere,
            data_filename: PathBuf::from("ionosphere.data"),
            test_filename: None,
            num_folds: 5,
            fold_to_cv: 0,
            fold_to_test: 1,
            noise_prob: 0.0,
            seed: 42,
            registry: Registry::Standard,
        }
    }

    #[test]
    fn accepts_a_sane_random_split_config() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn random_split_needs_three_folds() {
        let mut config = base();
        config.num_folds = 2;
        config.fold_to_test = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn fold_indices_must_be_distinct_and_in_range() {
        let mut config = base();
        config.fold_to_test = config.fold_to_cv;
        assert!(config.validate().is_err());

        let mut config = base();
        config.fold_to_test = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn noise_prob_is_bounded() {
        let mut config = base();
        config.noise_prob = 1.5;
        assert!(config.validate().is_err());
        config.noise_prob = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn registry_gates_census_formats() {
        let mut config = base();
        config.data_set = Dataset::Mnist17;
        assert!(config.validate().is_err());
        config.registry = Registry::Mnist;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn standard_split_relaxes_fold_constraints() {
        let mut config = base();
        config.test_filename = Some(PathBuf::from("adult.test"));
        config.num_folds = 1;
        // Fold indices are ignored in this mode.
        config.fold_to_test = 99;
        assert!(config.validate().is_ok());

        config.num_folds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn mnist_registry_has_no_standard_split() {
        let mut config = base();
        config.registry = Registry::Mnist;
        config.test_filename = Some(PathBuf::from("test.data"));
        assert!(config.validate().is_err());
    }
}
