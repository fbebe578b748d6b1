use log::{debug, info, trace};
use std::fmt;

use crate::dataset::Dataset;
use crate::error::{FitError, FitResult};
use crate::error_functions::ErrorFunction;
use crate::line::Line;

/// Learning rate and iteration count for one run.
///
/// The learning rate is taken as given. Values that are too large make the
/// parameters blow up, which is reported as [`FitError::Diverged`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    pub learning_rate: f64,
    pub num_iterations: usize,
}

impl Hyperparameters {
    pub fn new(learning_rate: f64, num_iterations: i64) -> FitResult<Self> {
        let num_iterations = usize::try_from(num_iterations)
            .map_err(|_| FitError::NegativeIterations(num_iterations))?;
        Ok(Self {
            learning_rate,
            num_iterations,
        })
    }

    pub fn fit(&self, x_ray: &[f64], y_ray: &[f64], initial: Line) -> FitResult<Line> {
        fit_from(x_ray, y_ray, self.learning_rate, self.num_iterations, initial)
    }
}

/// One gradient descent update. Both partial derivatives are taken at `line`
/// before either parameter moves.
fn descent_step(function: &ErrorFunction, line: &Line, learning_rate: f64) -> Line {
    let g = function.grad(line);
    Line::from_vector(&(line.to_vector() - learning_rate * g))
}

pub fn step(line: Line, x_ray: &[f64], y_ray: &[f64], learning_rate: f64) -> FitResult<Line> {
    let function = ErrorFunction::new(Dataset::new(x_ray, y_ray)?);
    Ok(descent_step(&function, &line, learning_rate))
}

/// Runs `num_iterations` descent steps starting from the origin line.
pub fn fit(
    x_ray: &[f64],
    y_ray: &[f64],
    learning_rate: f64,
    num_iterations: usize,
) -> FitResult<Line> {
    fit_from(x_ray, y_ray, learning_rate, num_iterations, Line::ORIGIN)
}

/// Same as [`fit`], but starts from `initial` instead of the origin.
pub fn fit_from(
    x_ray: &[f64],
    y_ray: &[f64],
    learning_rate: f64,
    num_iterations: usize,
    initial: Line,
) -> FitResult<Line> {
    let function = ErrorFunction::new(Dataset::new(x_ray, y_ray)?);
    debug!(
        "Fitting {} points, learning rate {}, {} iterations, starting at ({}, {})",
        x_ray.len(),
        learning_rate,
        num_iterations,
        initial.intercept,
        initial.slope
    );

    let mut line = initial;
    for iteration in 1..=num_iterations {
        line = descent_step(&function, &line, learning_rate);
        trace!("{}: b = {}, m = {}", iteration, line.intercept, line.slope);

        if !line.is_finite() {
            return Err(FitError::Diverged { iteration });
        }
    }

    info!("Descent finished with error {}", function.f(&line));
    Ok(line)
}

/// State after a completed descent step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Number of steps taken so far, starting at 1.
    pub iteration: usize,
    pub line: Line,
    /// Mean-squared error at `line`.
    pub loss: f64,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.iteration, self.line.intercept, self.line.slope, self.loss
        )
    }
}

/// Lazy per-iteration view of a run. Yields one snapshot per step and stops
/// after the last iteration, or right after reporting divergence.
pub struct Descent<'a> {
    function: ErrorFunction<'a>,
    learning_rate: f64,
    line: Line,
    iteration: usize,
    num_iterations: usize,
}

impl<'a> Descent<'a> {
    pub fn new(dataset: Dataset<'a>, initial: Line, hyperparameters: &Hyperparameters) -> Self {
        Self {
            function: ErrorFunction::new(dataset),
            learning_rate: hyperparameters.learning_rate,
            line: initial,
            iteration: 0,
            num_iterations: hyperparameters.num_iterations,
        }
    }

    pub fn line(&self) -> Line {
        self.line
    }
}

impl Iterator for Descent<'_> {
    type Item = FitResult<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iteration >= self.num_iterations {
            return None;
        }

        self.line = descent_step(&self.function, &self.line, self.learning_rate);
        self.iteration += 1;

        if !self.line.is_finite() {
            let iteration = self.iteration;
            self.iteration = self.num_iterations;
            return Some(Err(FitError::Diverged { iteration }));
        }

        Some(Ok(Snapshot {
            iteration: self.iteration,
            line: self.line,
            loss: self.function.f(&self.line),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.num_iterations - self.iteration))
    }
}

pub fn descend<'a>(
    x_ray: &'a [f64],
    y_ray: &'a [f64],
    initial: Line,
    hyperparameters: &Hyperparameters,
) -> FitResult<Descent<'a>> {
    Ok(Descent::new(Dataset::new(x_ray, y_ray)?, initial, hyperparameters))
}
