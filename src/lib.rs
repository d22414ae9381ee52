//! A winner-take-all [Self-Organizing Map]
//! (https://en.wikipedia.org/wiki/Self-organizing_map) calculator.
//!
//! Samples and weights are plain matrices with one vector per row. Training
//! repeatedly moves the best matching weight vector toward each sample.
//!
//! # Example
//!
//! ```
//! # use somcalc::parse::parse_matrix;
//! # use somcalc::trainer::*;
//! let samples = parse_matrix("0.8, 0.7, 0.4\n0.6, 0.9, 0.9", "samples").unwrap();
//! let weights = parse_matrix("0.5, 0.6, 0.8\n0.4, 0.2, 0.5", "weights").unwrap();
//!
//! let training = Trainer::new()
//!     .learning_rate(0.5)
//!     .iterations(1)
//!     .logging(Logging::Silent)
//!     .train(&samples, weights)
//!     .unwrap();
//!
//! assert_eq!(training.log.len(), 2);
//! assert_eq!(training.log[0].unit, 0);
//! ```

#[macro_use]
extern crate serde_derive;

pub mod error;
pub mod matrix;
pub mod parse;
pub mod report;
pub mod trainer;

mod utils;

pub use crate::error::{Result, ValidationError};
pub use crate::matrix::Mat;
