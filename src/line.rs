use nalgebra::Vector2;
use std::fmt;

/// The fitted model `y = slope * x + intercept`.
///
/// Doubles as the parameter pair `(b, m)` that gradient descent moves around.
/// Every update produces a new `Line`; nothing mutates one in place.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub intercept: f64,
    pub slope: f64,
}

impl Line {
    /// The line every run starts from unless told otherwise.
    pub const ORIGIN: Line = Line {
        intercept: 0.0,
        slope: 0.0,
    };

    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    pub fn f(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Derivative of `f(x)` with respect to `(b, m)`.
    pub fn grad(x: f64) -> Vector2<f64> {
        Vector2::new(1.0, x)
    }

    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.intercept, self.slope)
    }

    pub fn from_vector(params: &Vector2<f64>) -> Self {
        Self::new(params.x, params.y)
    }

    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.slope.is_finite()
    }
}

impl From<Line> for (f64, f64) {
    fn from(line: Line) -> Self {
        (line.intercept, line.slope)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {} * x + {}", self.slope, self.intercept)
    }
}
