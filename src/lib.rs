//! Fits `y = m * x + b` to one-dimensional data with batch gradient descent
//! on the mean-squared error.
//!
//! ```
//! use linear_descent::fit;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let y = [2.0, 4.0, 6.0, 8.0];
//! let line = fit(&x, &y, 0.01, 10_000).unwrap();
//! assert!((line.slope - 2.0).abs() < 1e-3);
//! assert!(line.intercept.abs() < 1e-3);
//! ```

pub mod dataset;
pub mod error;
pub mod error_functions;
pub mod line;
pub mod minimizers;
pub mod statistics;
pub mod utils;

pub use dataset::Dataset;
pub use error::{DataError, FitError, FitResult};
pub use error_functions::{gradient_b, gradient_m, mean_squared_error, ErrorFunction};
pub use line::Line;
pub use minimizers::{descend, fit, fit_from, step, Descent, Hyperparameters, Snapshot};
pub use statistics::{parameter_errors, ParameterErrors};
