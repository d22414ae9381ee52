//! somcalc - winner-take-all SOM calculator
//!
//! Reads samples and initial weights, trains, and prints the transcript.

use clap::Parser;
use log::info;
use somcalc::parse::{parse_iterations, parse_learning_rate, parse_matrix};
use somcalc::report::{transcript, ScatterPlot};
use somcalc::trainer::{Logging, Trainer};
use somcalc::Mat;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_SAMPLES: &str = "0.8, 0.7, 0.4\n0.6, 0.9, 0.9\n0.3, 0.4, 0.1\n0.1, 0.1, 0.2";
const DEFAULT_WEIGHTS: &str = "0.5, 0.6, 0.8\n0.4, 0.2, 0.5";

#[derive(Parser)]
#[command(name = "somcalc")]
#[command(version)]
#[command(about = "Winner-take-all Self-Organizing Map calculator", long_about = None)]
struct Cli {
    /// Training data file, one vector per line ("-" for stdin)
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Initial weights file, one vector per line
    #[arg(short, long, conflicts_with = "units")]
    weights: Option<PathBuf>,

    /// Generate this many random initial weight vectors instead
    #[arg(short, long)]
    units: Option<usize>,

    /// Random seed for generated weights
    #[arg(long, requires = "units")]
    seed: Option<u64>,

    /// Learning rate
    #[arg(short, long, default_value = "0.5")]
    learning_rate: String,

    /// Number of passes over the training data
    #[arg(short = 'n', long, default_value = "1")]
    iterations: String,

    /// Log a summary every N iterations
    #[arg(long)]
    log_every: Option<usize>,

    /// Write scatter plot data as JSON to this file
    #[arg(short, long)]
    plot: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let samples = match &cli.samples {
        Some(path) => parse_matrix(&read_input(path)?, "training data")?,
        None => parse_matrix(DEFAULT_SAMPLES, "training data")?,
    };
    let weights = match (&cli.weights, cli.units) {
        (_, Some(units)) => random_weights(&samples, units, cli.seed),
        (Some(path), None) => parse_matrix(&fs::read_to_string(path)?, "weights")?,
        (None, None) => parse_matrix(DEFAULT_WEIGHTS, "weights")?,
    };
    let learning_rate = parse_learning_rate(&cli.learning_rate)?;
    let iterations = parse_iterations(&cli.iterations)?;

    let logging = match cli.log_every {
        Some(n) => Logging::Iterations(n),
        None => Logging::Completion,
    };
    info!(
        "Training {} units on {} samples of dimension {}",
        weights.rows(),
        samples.rows(),
        samples.cols()
    );
    let training = Trainer::new()
        .learning_rate(learning_rate)
        .iterations(iterations)
        .logging(logging)
        .train(&samples, weights.clone())?;

    println!("{}", transcript(&weights, &training));

    if let Some(path) = &cli.plot {
        let plot = ScatterPlot::new(&samples, &weights, &training.weights);
        fs::write(path, serde_json::to_string_pretty(&plot)?)?;
        info!("Scatter data written to {}", path.display());
    }
    Ok(())
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

/// Draws `units` weight vectors within the per-dimension range of `samples`.
fn random_weights(samples: &Mat, units: usize, seed: Option<u64>) -> Mat {
    match samples.column_bounds() {
        Some(bounds) => Mat::random(seed, units, &bounds),
        // Left empty so training reports the missing samples.
        None => Mat::empty(),
    }
}
