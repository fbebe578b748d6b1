use nalgebra::Vector2;

use crate::dataset::Dataset;
use crate::error::FitResult;
use crate::line::Line;

/// Mean-squared error of a line against a dataset, and its derivatives.
#[derive(Debug, Clone, Copy)]
pub struct ErrorFunction<'a> {
    dataset: Dataset<'a>,
    ray_len: f64,
}

impl<'a> ErrorFunction<'a> {
    pub fn new(dataset: Dataset<'a>) -> Self {
        let ray_len = dataset.len() as f64;
        Self { dataset, ray_len }
    }

    /// `(1/N) Σ (y - (m x + b))²`
    pub fn f(&self, line: &Line) -> f64 {
        let mut sum = 0.0;
        for (x, y) in self.dataset.pairs() {
            sum += (y - line.f(x)).powi(2);
        }
        sum / self.ray_len
    }

    /// `∂f/∂b = -(2/N) Σ (y - (m x + b))`
    pub fn gradient_b(&self, line: &Line) -> f64 {
        let residual_sum: f64 = self.dataset.pairs().map(|(x, y)| y - line.f(x)).sum();
        (-2.0 / self.ray_len) * residual_sum
    }

    /// `∂f/∂m = -(2/N) Σ x (y - (m x + b))`
    pub fn gradient_m(&self, line: &Line) -> f64 {
        let weighted_sum: f64 = self
            .dataset
            .pairs()
            .map(|(x, y)| x * (y - line.f(x)))
            .sum();
        (-2.0 / self.ray_len) * weighted_sum
    }

    /// Both partial derivatives, evaluated at the same line.
    pub fn grad(&self, line: &Line) -> Vector2<f64> {
        Vector2::new(self.gradient_b(line), self.gradient_m(line))
    }
}

pub fn gradient_b(x_ray: &[f64], y_ray: &[f64], b: f64, m: f64) -> FitResult<f64> {
    let error_function = ErrorFunction::new(Dataset::new(x_ray, y_ray)?);
    Ok(error_function.gradient_b(&Line::new(b, m)))
}

pub fn gradient_m(x_ray: &[f64], y_ray: &[f64], b: f64, m: f64) -> FitResult<f64> {
    let error_function = ErrorFunction::new(Dataset::new(x_ray, y_ray)?);
    Ok(error_function.gradient_m(&Line::new(b, m)))
}

pub fn mean_squared_error(x_ray: &[f64], y_ray: &[f64], b: f64, m: f64) -> FitResult<f64> {
    let error_function = ErrorFunction::new(Dataset::new(x_ray, y_ray)?);
    Ok(error_function.f(&Line::new(b, m)))
}
