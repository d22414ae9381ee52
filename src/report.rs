//! Human-readable and plottable views of a training run.

use crate::matrix::{format_vector, Mat};
use crate::trainer::Training;

use itertools::Itertools;
use std::fmt;

/// Renders the transcript of a training run.
///
/// Lists the initial weights, every update grouped by iteration, and the
/// final weights.
pub fn transcript(initial: &Mat, training: &Training) -> String {
    Transcript { initial, training }.to_string()
}

/// Displays a training run as a transcript.
#[derive(Debug, Clone, Copy)]
pub struct Transcript<'a> {
    pub initial: &'a Mat,
    pub training: &'a Training,
}

impl<'a> fmt::Display for Transcript<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Weights before training:\n{}\n", self.initial)?;
        for (iteration, records) in &self.training.log.iter().group_by(|r| r.iteration) {
            writeln!(f, "Iteration {}:", iteration)?;
            for record in records {
                writeln!(
                    f,
                    "  Sample {}: BMU = {}, Updated Weights = {}",
                    record.sample,
                    record.unit,
                    format_vector(&record.weights)
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "Final Weights after Training:\n{}", self.training.weights)
    }
}

/// Points for a 2-D scatter plot of a training run.
///
/// Each point is the first two coordinates of a vector. One-dimensional
/// vectors are plotted on the x axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPlot {
    pub samples: Vec<[f64; 2]>,
    pub initial_weights: Vec<[f64; 2]>,
    pub final_weights: Vec<[f64; 2]>,
}

impl ScatterPlot {
    pub fn new(samples: &Mat, initial: &Mat, trained: &Mat) -> Self {
        ScatterPlot {
            samples: points(samples),
            initial_weights: points(initial),
            final_weights: points(trained),
        }
    }
}

fn points(mat: &Mat) -> Vec<[f64; 2]> {
    mat.iter_rows()
        .map(|row| [row[0], row.get(1).copied().unwrap_or(0.0)])
        .collect()
}
