//! Runs the interference classifier on the reference scenario and prints
//! the circuit, the raw counts and the post-selected class probabilities.
//!
//! Settings come from `QDCLASS_SHOTS`, `QDCLASS_SEED`, `QDCLASS_TEST_ANGLE`
//! and `QDCLASS_TRAINING_ANGLE`; log verbosity from `RUST_LOG`.

use qdclass::encoding::FIRST_TRAINING_VECTOR;
use qdclass::{ClassifierError, RunConfig, run_classifier};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run() {
        eprintln!("\n--- Classifier run failed ---");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ClassifierError> {
    let config = RunConfig::from_env()?;
    let angles = config.angles()?;

    let [tx, ty] = angles.test_vector();
    let [x1, y1] = angles.training_vector();
    println!("Test vector:          [{:.4}, {:.4}]", tx, ty);
    println!("Training vector (c0): [{:.4}, {:.4}]", FIRST_TRAINING_VECTOR[0], FIRST_TRAINING_VECTOR[1]);
    println!("Training vector (c1): [{:.4}, {:.4}]", x1, y1);

    let run = run_classifier(&config)?;

    println!("\nClassifier circuit:\n{}", run.circuit);
    println!("{}", run.counts);
    println!("{}", run.selection);
    Ok(())
}
