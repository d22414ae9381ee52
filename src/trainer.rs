//! Winner-take-all SOM training.
//!
//! Each sample, in input order, pulls its best matching unit (the closest
//! weight vector) a fraction of the way toward itself. Updates are applied
//! immediately, so later samples see the weights moved by earlier ones.

use crate::error::{Result, ValidationError};
use crate::matrix::Mat;
use crate::parse::check_compatible;
use crate::utils::{euclidean_distance, move_toward};

use log::{debug, info};
use std::time::Instant;

/// Returns the index of the weight vector closest to `sample`.
///
/// Distances are Euclidean. On an exact tie the lowest index wins.
///
/// Panics if `weights` is empty or its width differs from the sample's.
pub fn find_best_match(sample: &[f64], weights: &Mat) -> usize {
    assert!(!weights.is_empty());
    assert_eq!(sample.len(), weights.cols());
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (unit, weight) in weights.iter_rows().enumerate() {
        let distance = euclidean_distance(sample, weight);
        if distance < best_distance {
            best = unit;
            best_distance = distance;
        }
    }
    best
}

/// Trains `initial_weights` against `samples` without logging.
///
/// Shorthand for a silent `Trainer` with the given parameters.
pub fn train(
    samples: &Mat,
    initial_weights: Mat,
    learning_rate: f64,
    iterations: usize,
) -> Result<Training> {
    Trainer::new()
        .learning_rate(learning_rate)
        .iterations(iterations)
        .logging(Logging::Silent)
        .train(samples, initial_weights)
}

/// A single step of training: one sample moving its best matching unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Training iteration, starting at 1.
    pub iteration: usize,
    /// Position of the sample in the input, starting at 1.
    pub sample: usize,
    /// Index of the best matching unit.
    pub unit: usize,
    /// The unit's weights after the update.
    pub weights: Vec<f64>,
}

/// The result of a training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Training {
    /// Final weights, one unit per row in the original order.
    pub weights: Mat,
    /// Every update in the order it was applied.
    pub log: Vec<UpdateRecord>,
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No logs will be printed
    Silent,
    /// A summary will be printed at completion
    Completion,
    /// A summary will be printed after every `n` training iterations
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `iteration` of training.
    fn iteration(&self, iteration: usize, drift: f64) {
        if let Logging::Iterations(freq) = *self {
            if freq > 0 && iteration % freq == 0 {
                info!("Iteration {}:\tmean drift={}", iteration, drift);
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(&self, iterations: usize, updates: usize, start_time: Instant) {
        if let Logging::Silent = *self {
            return;
        }
        info!(
            "Ran {} iterations ({} updates) in {:?}.",
            iterations,
            updates,
            start_time.elapsed()
        );
    }
}

/// A builder for training runs.
#[derive(Debug, Clone)]
pub struct Trainer {
    learning_rate: f64,
    iterations: usize,
    logging: Logging,
}

impl Default for Trainer {
    fn default() -> Self {
        Trainer::new()
    }
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * A learning rate of 0.5.
    /// * A single pass over the samples.
    /// * Logs on training completion.
    pub fn new() -> Self {
        Trainer {
            learning_rate: 0.5,
            iterations: 1,
            logging: Logging::Completion,
        }
    }

    /// Sets the fraction of the distance a unit moves toward its sample.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the number of passes over the samples.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Trains `weights` against `samples`.
    ///
    /// The weights are taken by value and handed back inside the returned
    /// `Training`; keep a clone beforehand to compare with the initial state.
    ///
    /// Returns:
    ///   The trained weights and the update log, or an error if the inputs
    ///   are invalid. Nothing is modified when an error is returned.
    pub fn train(&self, samples: &Mat, mut weights: Mat) -> Result<Training> {
        self.validate(samples, &weights)?;

        let start_time = Instant::now();
        let mut log = Vec::new();
        for iteration in 1..=self.iterations {
            let mut drift = 0.0;
            for (i, sample) in samples.iter_rows().enumerate() {
                let unit = find_best_match(sample, &weights);
                let weight = weights.row_mut(unit);
                let before = euclidean_distance(sample, weight);
                move_toward(weight, sample, self.learning_rate);
                drift += (before - euclidean_distance(sample, weight)).abs();
                debug!(
                    "iteration {} sample {}: BMU = {}, weights = {:?}",
                    iteration,
                    i + 1,
                    unit,
                    weight
                );
                log.push(UpdateRecord {
                    iteration,
                    sample: i + 1,
                    unit,
                    weights: weight.to_vec(),
                });
            }
            self.logging.iteration(iteration, drift / samples.rows() as f64);
        }
        self.logging.completion(self.iterations, log.len(), start_time);
        Ok(Training { weights, log })
    }

    /// Verifies that all provided inputs to the `Trainer` are valid, returning
    /// an error if something is wrong.
    fn validate(&self, samples: &Mat, weights: &Mat) -> Result<()> {
        if !self.learning_rate.is_finite() {
            return Err(ValidationError::NonFiniteLearningRate(self.learning_rate));
        }
        check_compatible(samples, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: &[&[f64]]) -> Mat {
        Mat::from_rows("test", rows).unwrap()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
        }
    }

    fn scenario() -> (Mat, Mat) {
        let samples = mat(&[
            &[0.8, 0.7, 0.4],
            &[0.6, 0.9, 0.9],
            &[0.3, 0.4, 0.1],
            &[0.1, 0.1, 0.2],
        ]);
        let weights = mat(&[&[0.5, 0.6, 0.8], &[0.4, 0.2, 0.5]]);
        (samples, weights)
    }

    #[test]
    fn best_match_is_closest() {
        let weights = mat(&[&[0.0, 0.0], &[1.0, 1.0], &[5.0, 5.0]]);
        assert_eq!(find_best_match(&[0.9, 1.2], &weights), 1);
        assert_eq!(find_best_match(&[4.0, 4.0], &weights), 2);
    }

    #[test]
    fn best_match_exact() {
        let weights = mat(&[&[0.1, 0.2], &[0.3, 0.4], &[0.5, 0.6]]);
        assert_eq!(find_best_match(&[0.5, 0.6], &weights), 2);
    }

    #[test]
    fn best_match_tie_takes_lowest_index() {
        let weights = mat(&[&[1.0, 0.0], &[-1.0, 0.0], &[0.0, 1.0]]);
        assert_eq!(find_best_match(&[0.0, 0.0], &weights), 0);
        let weights = mat(&[&[3.0], &[1.0], &[1.0]]);
        assert_eq!(find_best_match(&[1.0], &weights), 1);
    }

    #[test]
    fn zero_iterations() {
        let (samples, weights) = scenario();
        let training = train(&samples, weights.clone(), 0.5, 0).unwrap();
        assert_eq!(training.weights, weights);
        assert!(training.log.is_empty());
    }

    #[test]
    fn single_update_is_exact() {
        let (s, w, rate) = (0.73, 0.21, 0.3);
        let training = train(&mat(&[&[s, -s]]), mat(&[&[w, 1.0]]), rate, 1).unwrap();
        assert_eq!(training.weights.row(0), &[w + rate * (s - w), 1.0 + rate * (-s - 1.0)]);
    }

    #[test]
    fn zero_rate_leaves_weights() {
        let (samples, weights) = scenario();
        let training = train(&samples, weights.clone(), 0.0, 5).unwrap();
        assert_eq!(training.weights, weights);
        assert_eq!(training.log.len(), 20);
    }

    #[test]
    fn unit_rate_copies_sample() {
        let samples = mat(&[&[0.25, 0.75]]);
        let weights = mat(&[&[0.5, 0.5], &[4.0, 4.0]]);
        let training = train(&samples, weights, 1.0, 1).unwrap();
        assert_eq!(training.weights.row(0), &[0.25, 0.75]);
        assert_eq!(training.weights.row(1), &[4.0, 4.0]);
    }

    #[test]
    fn log_follows_traversal_order() {
        let (samples, weights) = scenario();
        let training = train(&samples, weights, 0.5, 3).unwrap();
        assert_eq!(training.log.len(), 3 * 4);
        for (i, record) in training.log.iter().enumerate() {
            assert_eq!(record.iteration, i / 4 + 1);
            assert_eq!(record.sample, i % 4 + 1);
        }
    }

    #[test]
    fn log_holds_snapshots() {
        let samples = mat(&[&[1.0], &[1.0]]);
        let weights = mat(&[&[0.0]]);
        let training = train(&samples, weights, 0.5, 1).unwrap();
        assert_eq!(training.log[0].weights, vec![0.5]);
        assert_eq!(training.log[1].weights, vec![0.75]);
        assert_eq!(training.weights.row(0), &[0.75]);
    }

    #[test]
    fn updates_are_online() {
        // Unit 1 moved to 10.0, so the second sample now lands on unit 0.
        let samples = mat(&[&[10.0], &[2.0]]);
        let weights = mat(&[&[0.0], &[3.0]]);
        let training = train(&samples, weights, 1.0, 1).unwrap();
        assert_eq!(training.log[0].unit, 1);
        assert_eq!(training.log[1].unit, 0);
    }

    #[test]
    fn scenario_first_step() {
        let (samples, weights) = scenario();
        let first = samples.row(0);
        assert!((euclidean_distance(first, weights.row(0)) - 0.510).abs() < 1e-3);
        assert!((euclidean_distance(first, weights.row(1)) - 0.648).abs() < 1e-3);

        let training = train(&samples, weights, 0.5, 1).unwrap();
        assert_eq!(training.log[0].unit, 0);
        assert_close(&training.log[0].weights, &[0.65, 0.65, 0.6]);
    }

    #[test]
    fn scenario_full_pass() {
        let (samples, weights) = scenario();
        let training = train(&samples, weights, 0.5, 1).unwrap();
        let units: Vec<usize> = training.log.iter().map(|r| r.unit).collect();
        assert_eq!(units, vec![0, 0, 1, 1]);
        assert_close(training.weights.row(0), &[0.625, 0.775, 0.75]);
        assert_close(training.weights.row(1), &[0.225, 0.2, 0.25]);
    }

    #[test]
    fn dimension_mismatch() {
        let samples = mat(&[&[1.0, 2.0, 3.0]]);
        let weights = mat(&[&[1.0, 2.0]]);
        let err = train(&samples, weights, 0.5, 1).unwrap_err();
        assert_eq!(err, ValidationError::DimensionMismatch { samples: 3, weights: 2 });
    }

    #[test]
    fn empty_inputs() {
        let weights = mat(&[&[1.0]]);
        assert!(train(&Mat::empty(), weights.clone(), 0.5, 1).is_err());
        assert!(train(&weights, Mat::empty(), 0.5, 1).is_err());
    }

    #[test]
    fn non_finite_rate() {
        let weights = mat(&[&[1.0]]);
        assert!(train(&weights, weights.clone(), std::f64::NAN, 1).is_err());
        assert!(Trainer::new()
            .learning_rate(std::f64::INFINITY)
            .train(&weights, weights.clone())
            .is_err());
    }

    #[test]
    fn non_finite_values_rejected() {
        let samples = mat(&[&[0.1, 0.2], &[std::f64::NAN, 0.2]]);
        let weights = mat(&[&[0.5, 0.5], &[0.0, 0.0]]);
        assert!(train(&samples, weights.clone(), 0.5, 1).is_err());
        let weights = mat(&[&[std::f64::INFINITY, 0.5]]);
        assert!(train(&mat(&[&[0.1, 0.2]]), weights, 0.5, 1).is_err());
    }

    #[test]
    fn builder_defaults() {
        let (samples, weights) = scenario();
        let training = Trainer::default().train(&samples, weights.clone()).unwrap();
        assert_eq!(training, train(&samples, weights, 0.5, 1).unwrap());
    }
}
