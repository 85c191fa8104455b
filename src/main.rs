mod config;
mod data;
mod error;

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::Config;
use data::reader::{load_random_split, load_standard_split};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::parse();
    config.validate().context("invalid flags")?;

    // One generator per run, seeded from the flags; every shuffle and noise
    // draw advances this stream, so a fixed seed fixes the whole partition.
    let mut rng = StdRng::seed_from_u64(config.seed);

    let partition = match &config.test_filename {
        Some(test_filename) => {
            info!("Using standard train/test split");
            load_standard_split(
                &config.data_filename,
                test_filename,
                config.data_set,
                config.num_folds,
                &mut rng,
            )
        }
        None => {
            info!("Using random split from a single file");
            load_random_split(
                &config.data_filename,
                config.data_set,
                &config.fold_plan(),
                &mut rng,
            )
        }
    }
    .context("ingestion failed")?;

    println!("=== Dataset information ===");
    println!("Training examples: {}", partition.train.len());
    println!("CV examples: {}", partition.cv.len());
    println!("Test examples: {}", partition.test.len());
    println!("Total examples: {}", partition.len());
    println!("Features per example: {}", partition.num_features());

    Ok(())
}
