use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::model::{Example, Partition};

// ---------------------------------------------------------------------------
// Random k-fold partitioning
// ---------------------------------------------------------------------------

/// Fold-routing parameters for random-split mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldPlan {
    /// Number of folds; (F−2)/F of the data trains, 1/F cross-validates,
    /// 1/F tests.
    pub num_folds: usize,
    /// Zero-indexed fold routed to cross-validation.
    pub fold_to_cv: usize,
    /// Zero-indexed fold routed to testing.
    pub fold_to_test: usize,
    /// Probability of flipping an example's label.
    pub noise_prob: f64,
}

/// Shuffle the examples, inject label noise, route them into folds, and
/// initialize the training weights.
///
/// One uniform `[0,1)` draw is taken per example, in shuffled order, before
/// the example is routed. The draw order against the generator stream is
/// part of the reproducibility contract: a fixed seed must yield the same
/// partition on every run.
pub fn random_split(mut examples: Vec<Example>, plan: &FoldPlan, rng: &mut StdRng) -> Partition {
    examples.shuffle(rng);

    let mut partition = Partition::default();
    let mut fold = 0;
    for mut example in examples {
        let draw: f64 = rng.random();
        if draw < plan.noise_prob {
            example.label = example.label.flip();
        }
        if fold == plan.fold_to_test {
            partition.test.push(example);
        } else if fold == plan.fold_to_cv {
            partition.cv.push(example);
        } else {
            partition.train.push(example);
        }
        fold += 1;
        if fold == plan.num_folds {
            fold = 0;
        }
    }

    init_weights(&mut partition.train);
    partition
}

/// Set every training weight to `1 / |train|`, the uniform starting point
/// of the weighted training objective. Leaves an empty slice untouched.
pub fn init_weights(train: &mut [Example]) {
    if train.is_empty() {
        return;
    }
    let initial = 1.0 / train.len() as f32;
    for example in train.iter_mut() {
        example.weight = initial;
    }
}

// ---------------------------------------------------------------------------
// Standard-split CV carve-out
// ---------------------------------------------------------------------------

/// Carve a cross-validation slice out of an independently loaded training
/// set: shuffle, remove a prefix of `⌊|train| / num_folds⌋`, re-normalize
/// the remaining training weights. Returns an empty slice for
/// `num_folds <= 1`.
pub fn carve_cv_slice(
    train: &mut Vec<Example>,
    num_folds: usize,
    rng: &mut StdRng,
) -> Vec<Example> {
    if num_folds <= 1 {
        return Vec::new();
    }
    train.shuffle(rng);
    let cut = train.len() / num_folds;
    let cv: Vec<Example> = train.drain(..cut).collect();
    init_weights(train);
    cv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Label;
    use rand::SeedableRng;

    /// Examples tagged through values[0] so set membership can be checked
    /// after shuffling.
    fn tagged(n: usize, label: Label) -> Vec<Example> {
        (0..n)
            .map(|i| Example::new(label, vec![i as f32]))
            .collect()
    }

    fn plan(noise_prob: f64) -> FoldPlan {
        FoldPlan {
            num_folds: 5,
            fold_to_cv: 0,
            fold_to_test: 1,
            noise_prob,
        }
    }

    fn tags(examples: &[Example]) -> Vec<f32> {
        examples.iter().map(|ex| ex.values[0]).collect()
    }

    #[test]
    fn every_example_lands_in_exactly_one_fold() {
        let mut rng = StdRng::seed_from_u64(42);
        let partition = random_split(tagged(103, Label::Positive), &plan(0.0), &mut rng);

        assert_eq!(partition.len(), 103);
        let mut all: Vec<f32> = tags(&partition.train);
        all.extend(tags(&partition.cv));
        all.extend(tags(&partition.test));
        all.sort_by(f32::total_cmp);
        let expected: Vec<f32> = (0..103).map(|i| i as f32).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn fold_sizes_follow_round_robin_routing() {
        let mut rng = StdRng::seed_from_u64(1);
        let partition = random_split(tagged(100, Label::Positive), &plan(0.0), &mut rng);
        // 100 examples over 5 folds: one fold each for cv and test.
        assert_eq!(partition.cv.len(), 20);
        assert_eq!(partition.test.len(), 20);
        assert_eq!(partition.train.len(), 60);
    }

    #[test]
    fn same_seed_reproduces_the_partition() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(7);
            random_split(tagged(250, Label::Positive), &plan(0.0), &mut rng)
        };
        let a = run();
        let b = run();
        assert_eq!(a.train, b.train);
        assert_eq!(a.cv, b.cv);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn train_weights_sum_to_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let partition = random_split(tagged(750, Label::Positive), &plan(0.0), &mut rng);
        let sum: f64 = partition.train.iter().map(|ex| ex.weight as f64).sum();
        assert!((sum - 1.0).abs() < 1e-6, "weight sum was {sum}");
        // cv and test members keep the unset weight.
        assert!(partition.cv.iter().all(|ex| ex.weight == 0.0));
        assert!(partition.test.iter().all(|ex| ex.weight == 0.0));
    }

    #[test]
    fn zero_noise_preserves_labels() {
        let mut rng = StdRng::seed_from_u64(11);
        let partition = random_split(tagged(60, Label::Negative), &plan(0.0), &mut rng);
        assert!(partition.train.iter().all(|ex| ex.label == Label::Negative));
        assert!(partition.cv.iter().all(|ex| ex.label == Label::Negative));
        assert!(partition.test.iter().all(|ex| ex.label == Label::Negative));
    }

    #[test]
    fn full_noise_flips_every_label() {
        let mut rng = StdRng::seed_from_u64(11);
        let partition = random_split(tagged(60, Label::Negative), &plan(1.0), &mut rng);
        assert!(partition.train.iter().all(|ex| ex.label == Label::Positive));
        assert!(partition.cv.iter().all(|ex| ex.label == Label::Positive));
        assert!(partition.test.iter().all(|ex| ex.label == Label::Positive));
    }

    #[test]
    fn flip_fraction_converges_to_noise_prob() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 20_000;
        let partition = random_split(tagged(n, Label::Positive), &plan(0.25), &mut rng);
        let mut flipped = 0usize;
        for ex in partition
            .train
            .iter()
            .chain(&partition.cv)
            .chain(&partition.test)
        {
            if ex.label == Label::Negative {
                flipped += 1;
            }
        }
        let fraction = flipped as f64 / n as f64;
        assert!(
            (fraction - 0.25).abs() < 0.02,
            "flip fraction was {fraction}"
        );
    }

    #[test]
    fn carve_takes_a_fifth_and_renormalizes() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut train = tagged(100, Label::Positive);
        init_weights(&mut train);

        let cv = carve_cv_slice(&mut train, 5, &mut rng);
        assert_eq!(cv.len(), 20);
        assert_eq!(train.len(), 80);

        // Carve is a set partition of the original training data.
        let mut all = tags(&train);
        all.extend(tags(&cv));
        all.sort_by(f32::total_cmp);
        let expected: Vec<f32> = (0..100).map(|i| i as f32).collect();
        assert_eq!(all, expected);

        let sum: f64 = train.iter().map(|ex| ex.weight as f64).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(train.iter().all(|ex| (ex.weight - 1.0 / 80.0).abs() < 1e-9));
    }

    #[test]
    fn single_fold_carves_nothing() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut train = tagged(40, Label::Positive);
        init_weights(&mut train);
        assert!(carve_cv_slice(&mut train, 1, &mut rng).is_empty());
        assert!(carve_cv_slice(&mut train, 0, &mut rng).is_empty());
        assert_eq!(train.len(), 40);
    }
}
