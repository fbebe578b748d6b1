use std::io;

/// Everything that can stop a fit before it returns a line.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    LengthMismatch { len_x: usize, len_y: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("iteration count must be non-negative, got {0}")]
    NegativeIterations(i64),

    #[error("parameters became non-finite at iteration {iteration}")]
    Diverged { iteration: usize },

    #[error("not enough points: got {len}, need at least {needed}")]
    NotEnoughPoints { len: usize, needed: usize },

    #[error("degenerate x: no variance in x")]
    DegenerateX,
}

pub type FitResult<T> = Result<T, FitError>;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("could not read data file: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map_or(0, |p| p.line() as usize);
        let message = error.to_string();
        match error.into_kind() {
            csv::ErrorKind::Io(e) => DataError::Io(e),
            _ => DataError::Parse { line, message },
        }
    }
}
