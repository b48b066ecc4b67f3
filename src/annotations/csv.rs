use crate::model::{Point, round_half_even};

use super::{AnnotationError, Result};

/// Parses `x,y[,intensity]` rows. Blank lines and `#` comments are skipped;
/// scientific notation is accepted so files written as floats still load.
pub(super) fn parse_rows(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = line
            .split(',')
            .map(|field| parse_field(field, index + 1))
            .collect::<Result<Vec<_>>>()?;
        let point = match fields.as_slice() {
            [x, y] => Point::new(*x, *y),
            [x, y, intensity, ..] => Point::with_intensity(*x, *y, *intensity),
            _ => {
                return Err(AnnotationError::Malformed {
                    line: index + 1,
                    reason: format!("expected at least 2 columns, found {}", fields.len()),
                });
            }
        };
        points.push(point);
    }
    Ok(points)
}

fn parse_field(field: &str, line: usize) -> Result<f64> {
    let trimmed = field.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| AnnotationError::Malformed {
            line,
            reason: format!("`{trimmed}` is not a number"),
        })?;
    if !value.is_finite() {
        return Err(AnnotationError::Malformed {
            line,
            reason: format!("`{trimmed}` is not finite"),
        });
    }
    Ok(value)
}

/// Integer rows; a row carries a third column when its point has an intensity.
pub(super) fn format_rows(points: &[Point]) -> String {
    let mut out = String::new();
    for point in points {
        let (x, y) = point.rounded();
        match point.intensity {
            Some(intensity) => {
                out.push_str(&format!("{x},{y},{}\n", round_half_even(intensity)));
            }
            None => out.push_str(&format!("{x},{y}\n")),
        }
    }
    out
}
