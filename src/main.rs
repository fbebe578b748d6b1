use clap::Parser;
use log::{error, info, warn, LevelFilter};
use std::{
    env,
    io::{self, Write},
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use linear_descent::{
    descend, mean_squared_error, parameter_errors, utils, DataError, FitError, Hyperparameters,
    Line,
};

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("{0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Fit(#[from] FitError),
    #[error("could not write history: {0}")]
    Io(#[from] io::Error),
}

fn parse_delimiter(delimiter: &str) -> Result<u8, String> {
    match delimiter.as_bytes() {
        [byte] => Ok(*byte),
        _ => Err(format!("delimiter must be a single byte, got '{}'", delimiter)),
    }
}

#[derive(Parser)]
struct Args {
    /// Path to a file with one `x y` pair per line
    datafile: PathBuf,
    /// Column separator in the data file
    #[arg(short, long, default_value = " ", value_parser = parse_delimiter)]
    delimiter: u8,
    /// Step size of each gradient descent update
    #[arg(short, long, default_value_t = 0.01)]
    learning_rate: f64,
    /// Number of gradient descent updates to run
    #[arg(short = 'n', long, default_value_t = 1000, allow_negative_numbers = true)]
    iterations: i64,
    /// Initial intercept
    #[arg(short = 'b', long, default_value_t = 0.0, allow_negative_numbers = true)]
    intercept: f64,
    /// Initial slope
    #[arg(short = 'm', long, default_value_t = 0.0, allow_negative_numbers = true)]
    slope: f64,
    /// Print every N-th iteration as `iteration b m error`
    #[arg(long, value_name = "N")]
    history: Option<NonZeroUsize>,
    /// Log progress even when RUST_LOG is not set
    #[arg(short, long)]
    verbose: bool,
}

/// Runs the descent, writing every `every`-th snapshot to `out`, and returns
/// the final line.
fn descend_with_history<W: Write>(
    x_ray: &[f64],
    y_ray: &[f64],
    initial: Line,
    hyperparameters: &Hyperparameters,
    every: NonZeroUsize,
    out: &mut W,
) -> Result<Line, AppError> {
    let mut line = initial;
    for snapshot in descend(x_ray, y_ray, initial, hyperparameters)? {
        let snapshot = snapshot?;
        if snapshot.iteration % every.get() == 0 {
            writeln!(out, "{}", snapshot)?;
        }
        line = snapshot.line;
    }
    Ok(line)
}

fn run(args: &Args) -> Result<(), AppError> {
    let (x_ray, y_ray) = utils::load_txt(&args.datafile, args.delimiter)?;
    info!("Loaded {} points from {}", x_ray.len(), args.datafile.display());

    let hyperparameters = Hyperparameters::new(args.learning_rate, args.iterations)?;
    let initial = Line::new(args.intercept, args.slope);

    let start = Instant::now();
    let line = match args.history {
        Some(every) => descend_with_history(
            &x_ray,
            &y_ray,
            initial,
            &hyperparameters,
            every,
            &mut io::stdout().lock(),
        )?,
        None => hyperparameters.fit(&x_ray, &y_ray, initial)?,
    };
    info!("Descent took {}", utils::format_duration(start.elapsed()));

    let error = mean_squared_error(&x_ray, &y_ray, line.intercept, line.slope)?;
    match parameter_errors(&x_ray, &y_ray, &line) {
        Ok(uncertainties) => println!(
            "Got optimal parameters: b = {}, m = {}, which gives an error of {}",
            utils::format_with_uncertainty(line.intercept, uncertainties.intercept),
            utils::format_with_uncertainty(line.slope, uncertainties.slope),
            error
        ),
        Err(e) => {
            warn!("Could not estimate parameter uncertainties: {}", e);
            println!(
                "Got optimal parameters: b = {}, m = {}, which gives an error of {}",
                line.intercept, line.slope, error
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut builder = pretty_env_logger::formatted_timed_builder();
    if let Ok(s) = env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        builder.filter_level(if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        });
    }
    builder.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_prints_every_nth_iteration() {
        let x_ray = [1.0, 2.0, 3.0, 4.0];
        let y_ray = [2.0, 4.0, 6.0, 8.0];
        let hyperparameters = Hyperparameters::new(0.01, 10).unwrap();
        let every = NonZeroUsize::new(3).unwrap();

        let mut out = Vec::new();
        let line = descend_with_history(
            &x_ray,
            &y_ray,
            Line::ORIGIN,
            &hyperparameters,
            every,
            &mut out,
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let iterations: Vec<&str> = printed
            .lines()
            .map(|row| row.split(' ').next().unwrap())
            .collect();
        assert_eq!(iterations, vec!["3", "6", "9"]);
        assert_eq!(line, hyperparameters.fit(&x_ray, &y_ray, Line::ORIGIN).unwrap());
    }

    #[test]
    fn test_history_stops_on_divergence() {
        let hyperparameters = Hyperparameters::new(1.0, 10_000).unwrap();
        let mut out = Vec::new();
        let err = descend_with_history(
            &[1.0, 2.0, 3.0, 4.0],
            &[2.0, 4.0, 6.0, 8.0],
            Line::ORIGIN,
            &hyperparameters,
            NonZeroUsize::new(1).unwrap(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Fit(FitError::Diverged { .. })), "{:?}", err);
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(" "), Ok(b' '));
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
