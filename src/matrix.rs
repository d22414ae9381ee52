use crate::error::{Result, ValidationError};

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::slice::ChunksExact;

/// A dense matrix holding one vector per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f64>, // row-major array
}

impl Mat {
    /// Returns a matrix with no rows.
    pub fn empty() -> Self {
        Mat {
            rows: 0,
            cols: 0,
            data: Vec::new(),
        }
    }

    /// Builds a matrix from a list of rows, named `name` in errors.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows<R>(name: &str, rows: &[R]) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => return Ok(Mat::empty()),
        };
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ValidationError::RaggedRows {
                    matrix: name.to_string(),
                    row: i + 1,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Mat {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Fills a `rows` x `bounds.len()` matrix with values drawn uniformly
    /// from `[low, high]` for each column's `(low, high)` bound.
    ///
    /// A degenerate bound where `low == high` yields that constant. Bounds
    /// whose width overflows `f64` are still sampled.
    pub fn random(seed: Option<u64>, rows: usize, bounds: &[(f64, f64)]) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let cols = bounds.len();
        let mut data = Vec::with_capacity(rows * cols);
        for _ in 0..rows {
            for &(low, high) in bounds {
                if low < high {
                    // Interpolated so `high - low` is never computed.
                    let t: f64 = rng.gen();
                    let value = (1.0 - t) * low + t * high;
                    data.push(value.max(low).min(high));
                } else {
                    data.push(low);
                }
            }
        }
        Mat { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterates over the rows in order.
    pub fn iter_rows(&self) -> ChunksExact<'_, f64> {
        // chunks_exact panics on zero, and an empty matrix has no data anyway.
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Returns the per-column `(min, max)` bounds, or `None` if empty.
    pub fn column_bounds(&self) -> Option<Vec<(f64, f64)>> {
        if self.is_empty() {
            return None;
        }
        let bounds = (0..self.cols)
            .map(|c| {
                self.iter_rows()
                    .map(|row| row[c])
                    .minmax()
                    .into_option()
                    .unwrap_or((0.0, 0.0))
            })
            .collect();
        Some(bounds)
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }
}

/// Formats a single vector as `[a, b, c]`.
///
/// Values are rounded to 8 decimal places with trailing zeros dropped.
pub fn format_vector(vector: &[f64]) -> String {
    format!("[{}]", vector.iter().map(|&v| format_value(v)).join(", "))
}

fn format_value(value: f64) -> String {
    let text = format!("{:.8}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

impl fmt::Display for Mat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let lines = self.iter_rows().map(format_vector).join("\n");
        write!(f, "{}", lines)
    }
}
