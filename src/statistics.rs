use nalgebra::{Matrix2, Vector2};

use crate::dataset::Dataset;
use crate::error::{FitError, FitResult};
use crate::line::Line;

/// Standard errors of the fitted parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterErrors {
    pub intercept: f64,
    pub slope: f64,
}

/// Computes the outer product of a column vector
#[inline]
fn outer(vector: &Vector2<f64>) -> Matrix2<f64> {
    vector * vector.transpose()
}

/// Estimate variance of the experimental error
fn calculate_variance(dataset: &Dataset, line: &Line) -> f64 {
    let mut variance = 0.0;
    for (x, y) in dataset.pairs() {
        variance += (y - line.f(x)).powi(2);
    }
    variance / ((dataset.len() - 2) as f64)
}

fn calculate_covariance(dataset: &Dataset, line: &Line) -> FitResult<Matrix2<f64>> {
    let mut outer_sum = Matrix2::<f64>::zeros();
    for x in dataset.x() {
        outer_sum += outer(&Line::grad(*x));
    }

    let outer_inverse = outer_sum.try_inverse().ok_or(FitError::DegenerateX)?;
    if outer_inverse.iter().any(|v| !v.is_finite()) {
        return Err(FitError::DegenerateX);
    }

    Ok(outer_inverse * calculate_variance(dataset, line))
}

/// Standard errors of `line`'s intercept and slope, assuming `line` is the
/// least-squares fit of the data. Two parameters are estimated, so at least
/// three points are needed.
pub fn parameter_errors(x_ray: &[f64], y_ray: &[f64], line: &Line) -> FitResult<ParameterErrors> {
    let dataset = Dataset::new(x_ray, y_ray)?;
    if dataset.len() <= 2 {
        return Err(FitError::NotEnoughPoints {
            len: dataset.len(),
            needed: 3,
        });
    }

    let errors = calculate_covariance(&dataset, line)?
        .diagonal()
        .map(|v| v.sqrt());
    Ok(ParameterErrors {
        intercept: errors.x,
        slope: errors.y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_line_has_no_error() {
        let x_ray = [1.0, 2.0, 3.0, 4.0];
        let y_ray = [3.0, 5.0, 7.0, 9.0];
        let errors = parameter_errors(&x_ray, &y_ray, &Line::new(1.0, 2.0)).unwrap();
        let expected = ParameterErrors {
            intercept: 0.0,
            slope: 0.0,
        };
        assert_eq!(errors, expected);
    }

    #[test]
    fn test_matches_least_squares_formulas() {
        let x_ray = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y_ray = [1.2, 2.8, 3.1, 4.9, 5.2];
        let n = x_ray.len() as f64;

        let x_mean = x_ray.iter().sum::<f64>() / n;
        let y_mean = y_ray.iter().sum::<f64>() / n;
        let s_xx: f64 = x_ray.iter().map(|x| (x - x_mean).powi(2)).sum();
        let s_xy: f64 = x_ray
            .iter()
            .zip(y_ray.iter())
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();
        let slope = s_xy / s_xx;
        let line = Line::new(y_mean - slope * x_mean, slope);

        let residual_sum: f64 = x_ray
            .iter()
            .zip(y_ray.iter())
            .map(|(x, y)| (y - line.f(*x)).powi(2))
            .sum();
        let variance = residual_sum / (n - 2.0);
        let expected_slope = (variance / s_xx).sqrt();
        let expected_intercept = (variance * (1.0 / n + x_mean * x_mean / s_xx)).sqrt();

        let errors = parameter_errors(&x_ray, &y_ray, &line).unwrap();
        assert!((errors.slope - expected_slope).abs() < 1e-10, "{:?}", errors);
        assert!(
            (errors.intercept - expected_intercept).abs() < 1e-10,
            "{:?}",
            errors
        );
    }

    #[test]
    fn test_too_few_points() {
        let err = parameter_errors(&[1.0, 2.0], &[1.0, 2.0], &Line::ORIGIN).unwrap_err();
        assert_eq!(err, FitError::NotEnoughPoints { len: 2, needed: 3 });
    }

    #[test]
    fn test_constant_x_is_degenerate() {
        let err = parameter_errors(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0], &Line::ORIGIN).unwrap_err();
        assert_eq!(err, FitError::DegenerateX);
    }
}
