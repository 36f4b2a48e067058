use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, Trim};

use crate::{error::AppResult, models::RatingsMatrix};

/// Loads a ratings matrix from a CSV file
///
/// The first line holds movie names and is skipped. See [`parse_ratings`] for
/// how individual cells are interpreted.
pub fn load_ratings_matrix(path: impl AsRef<Path>) -> AppResult<RatingsMatrix> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading ratings matrix");

    let file = File::open(path)?;
    let matrix = parse_ratings(file)?;

    tracing::info!(
        users = matrix.user_count(),
        movies = matrix.movie_count(),
        density = matrix.density(),
        "Ratings matrix loaded"
    );

    Ok(matrix)
}

/// Parses comma-separated ratings, one user per line, after a header line
///
/// Parsing is lenient: a cell that does not start with a non-negative integer
/// becomes 0 (unrated), and empty lines are skipped with a warning. Row shape
/// is validated afterwards by [`RatingsMatrix::new`].
pub fn parse_ratings<R: Read>(mut reader: R) -> AppResult<RatingsMatrix> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    // The first line always holds movie names, even when it is empty
    let body = text.split_once('\n').map_or("", |(_, rest)| rest);

    for line in empty_lines(body) {
        tracing::warn!(line, "Skipping empty row");
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    let mut coerced = 0usize;

    for record in reader.records() {
        let record = record?;
        let row: Vec<u32> = record
            .iter()
            .map(|cell| {
                parse_rating(cell).unwrap_or_else(|| {
                    coerced += 1;
                    0
                })
            })
            .collect();
        rows.push(row);
    }

    if coerced > 0 {
        tracing::debug!(cells = coerced, "Coerced unparsable ratings to 0");
    }

    Ok(RatingsMatrix::new(rows)?)
}

/// 1-based file line numbers of the empty lines following the header
fn empty_lines(body: &str) -> Vec<usize> {
    body.lines()
        .enumerate()
        .filter(|(_, line)| line.trim_end_matches('\r').is_empty())
        .map(|(index, _)| index + 2)
        .collect()
}

/// Reads the leading non-negative integer of a cell, ignoring trailing text
fn parse_rating(cell: &str) -> Option<u32> {
    let digits = cell.strip_prefix('+').unwrap_or(cell);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }
    digits[..end].parse().ok()
}
