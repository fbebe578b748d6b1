use itertools::izip;

use crate::error::{FitError, FitResult};

/// Borrowed `(x, y)` pairs, checked once for equal, non-zero length.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    x_ray: &'a [f64],
    y_ray: &'a [f64],
}

impl<'a> Dataset<'a> {
    pub fn new(x_ray: &'a [f64], y_ray: &'a [f64]) -> FitResult<Self> {
        if x_ray.len() != y_ray.len() {
            return Err(FitError::LengthMismatch {
                len_x: x_ray.len(),
                len_y: y_ray.len(),
            });
        }
        if x_ray.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        Ok(Self { x_ray, y_ray })
    }

    pub fn len(&self) -> usize {
        self.x_ray.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_ray.is_empty()
    }

    pub fn x(&self) -> &'a [f64] {
        self.x_ray
    }

    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        izip!(self.x_ray, self.y_ray).map(|(x, y)| (*x, *y))
    }
}
