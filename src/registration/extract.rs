use crate::constants::PRECINCT_NO_HEADER_PATTERN;
use crate::error::{PrecinctError, Result};
use crate::types::{Cell, ColumnLayout, ExtractedRecord, Grid, HeaderMatch};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static PRECINCT_NO_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(PRECINCT_NO_HEADER_PATTERN).expect("precinct header pattern is valid")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static CANONICAL_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+$").expect("integer pattern is valid"));

/// The default "Precinct No" header pattern.
pub fn precinct_no_header() -> &'static Regex {
    &PRECINCT_NO_HEADER
}

/// Trims a cell and collapses internal whitespace runs. Missing cells become "".
pub fn normalize_cell(cell: Option<&str>) -> String {
    match cell {
        Some(text) => WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned(),
        None => String::new(),
    }
}

fn cell_at(row: &[Cell], column: usize) -> Option<&str> {
    row.get(column).and_then(|cell| cell.as_deref())
}

/// Finds the first cell matching `pattern` in row-major order within the first
/// `max_rows` rows.
pub fn locate_header(grid: &Grid, pattern: &Regex, max_rows: usize) -> Result<HeaderMatch> {
    let scanned = max_rows.min(grid.len());
    for (row_index, row) in grid.iter().take(scanned).enumerate() {
        for (column_index, cell) in row.iter().enumerate() {
            if pattern.is_match(&normalize_cell(cell.as_deref())) {
                debug!(row = row_index, column = column_index, "Found precinct header");
                return Ok(HeaderMatch {
                    row: row_index,
                    column: column_index,
                });
            }
        }
    }
    Err(PrecinctError::HeaderNotFound { scanned })
}

/// Reduces a count cell to an optional integer.
///
/// Everything but digits and `-` is stripped first, so `"1,234"` is 1234.
/// Empty results and a lone `-` are missing. Leftovers that are not a plain
/// integer literal (`"12-3"`, `"--5"`) or do not fit in an i64 are missing too.
pub fn clean_count(cell: Option<&str>) -> Option<i64> {
    let raw = cell?;
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    if stripped.is_empty() || stripped == "-" {
        return None;
    }
    if !CANONICAL_INTEGER.is_match(&stripped) {
        warn!(cell = raw, stripped = %stripped, "Malformed count, treating as missing");
        return None;
    }
    match stripped.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(cell = raw, error = %e, "Count out of range, treating as missing");
            None
        }
    }
}

/// Extracts the precinct rows of one sheet using the default header pattern.
pub fn extract_records(grid: &Grid, max_rows: usize) -> Result<Vec<ExtractedRecord>> {
    extract_records_with(grid, precinct_no_header(), max_rows)
}

pub fn extract_records_with(
    grid: &Grid,
    pattern: &Regex,
    max_rows: usize,
) -> Result<Vec<ExtractedRecord>> {
    let header = locate_header(grid, pattern, max_rows)?;
    let layout = ColumnLayout::from_header_column(header.column);

    let records = grid
        .iter()
        .skip(header.row + 1)
        .filter_map(|row| extract_row(row, &layout))
        .filter(|record| !record.is_blank())
        .collect();
    Ok(records)
}

fn extract_row(row: &[Cell], layout: &ColumnLayout) -> Option<ExtractedRecord> {
    let precinct_no = normalize_cell(cell_at(row, layout.precinct_no));
    let precinct_name = cell_at(row, layout.precinct_name).map(|name| name.trim().to_string());

    // Rows need an identifier before their counts are looked at.
    if precinct_no.is_empty() && precinct_name.is_none() {
        return None;
    }

    Some(ExtractedRecord {
        precinct_no,
        precinct_name,
        active: clean_count(cell_at(row, layout.active)),
        inactive: clean_count(cell_at(row, layout.inactive)),
    })
}
