//! Parsing of the free-text inputs into validated numeric values.
//!
//! Matrices are written one vector per line, with values separated by
//! commas, whitespace, or any mix of the two:
//!
//! ```text
//! 0.8, 0.7, 0.4
//! 0.6  0.9  0.9
//! ```

use crate::error::{Result, ValidationError};
use crate::matrix::Mat;

/// Parses `text` into a matrix, using `name` to label errors.
///
/// Blank lines and empty fields are skipped. Empty text gives an empty
/// matrix; emptiness is checked when training starts.
pub fn parse_matrix(text: &str, name: &str) -> Result<Mat> {
    let mut rows = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| parse_real(token, name))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Mat::from_rows(name, &rows)
}

/// Parses a learning rate. Any finite real is accepted.
pub fn parse_learning_rate(text: &str) -> Result<f64> {
    parse_real(text.trim(), "learning rate")
}

/// Parses a non-negative iteration count.
pub fn parse_iterations(text: &str) -> Result<usize> {
    let text = text.trim();
    text.parse::<usize>()
        .map_err(|_| ValidationError::InvalidIterations(text.to_string()))
}

/// Verifies that `samples` and `weights` can be trained together.
///
/// Both must be non-empty, share a width, and hold only finite values.
pub fn check_compatible(samples: &Mat, weights: &Mat) -> Result<()> {
    if samples.is_empty() || samples.cols() == 0 {
        return Err(ValidationError::EmptyInput("training data".to_string()));
    }
    if weights.is_empty() || weights.cols() == 0 {
        return Err(ValidationError::EmptyInput("weights".to_string()));
    }
    if samples.cols() != weights.cols() {
        return Err(ValidationError::DimensionMismatch {
            samples: samples.cols(),
            weights: weights.cols(),
        });
    }
    check_finite(samples, "training data")?;
    check_finite(weights, "weights")
}

fn check_finite(mat: &Mat, name: &str) -> Result<()> {
    match mat.iter_rows().flatten().find(|v| !v.is_finite()) {
        Some(value) => Err(ValidationError::NotANumber {
            field: name.to_string(),
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn parse_real(token: &str, field: &str) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field: field.to_string(),
            value: token.to_string(),
        }),
    }
}
