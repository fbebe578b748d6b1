use std::{fs::File, io::Read, path::Path, time::Duration};

use crate::error::DataError;

/// Reads `x y` pairs, one per line, separated by `delimiter`. Lines starting
/// with `#` and blank lines are skipped, repeated delimiters count as one.
pub fn load_txt(path: &Path, delimiter: u8) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    read_pairs(File::open(path)?, delimiter)
}

pub fn parse_txt(contents: &str, delimiter: u8) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    read_pairs(contents.as_bytes(), delimiter)
}

fn read_pairs<R: Read>(reader: R, delimiter: u8) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut x_ray = Vec::new();
    let mut y_ray = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        let columns: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        let [x, y] = columns.as_slice() else {
            if columns.is_empty() {
                continue;
            }
            return Err(DataError::Parse {
                line,
                message: format!("expected 2 columns, got {}", columns.len()),
            });
        };

        let parse = |value: &str| {
            value.parse::<f64>().map_err(|e| DataError::Parse {
                line,
                message: format!("'{}' is not a number: {}", value, e),
            })
        };
        x_ray.push(parse(*x)?);
        y_ray.push(parse(*y)?);
    }

    Ok((x_ray, y_ray))
}

pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if seconds >= 1.0 {
        format!("{:.2} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.2} ms", seconds * 1e3)
    } else {
        format!("{:.2} µs", seconds * 1e6)
    }
}

pub fn format_with_uncertainty(value: f64, uncertainty: f64) -> String {
    format!("{} ± {:.3e}", value, uncertainty)
}
