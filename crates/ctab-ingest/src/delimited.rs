use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use ctab_model::{Cell, CellGrid, Result, TableError};

use crate::source::RawTable;

const COMMENT_MARKER: char = '#';

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> Cell {
    Cell::from_text(raw.trim().trim_matches('\u{feff}'))
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> TableError {
    TableError::Read {
        origin: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Read a delimited text file into a grid of cells.
///
/// With `named`, the first non-blank row supplies the variable names. When no
/// delimiter is given, named files are comma separated and unnamed files are
/// split on runs of whitespace (with `#` starting a comment).
pub fn read_delimited(path: &Path, named: bool, delimiter: Option<char>) -> Result<RawTable> {
    if !path.exists() {
        return Err(TableError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw_rows = match (delimiter, named) {
        (Some(delimiter), _) => read_records(path, delimiter)?,
        (None, true) => read_records(path, ',')?,
        (None, false) => read_whitespace(path)?,
    };
    debug!(
        path = %path.display(),
        rows = raw_rows.len(),
        named,
        "read delimited file"
    );
    split_header(raw_rows, named)
}

fn read_records(path: &Path, delimiter: char) -> Result<Vec<Vec<String>>> {
    if !delimiter.is_ascii() {
        return Err(read_error(
            path,
            format!("delimiter {delimiter:?} is not an ASCII character"),
        ));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_path(path)
        .map_err(|err| read_error(path, err))?;
    let mut raw_rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| read_error(path, err))?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    Ok(raw_rows)
}

fn read_whitespace(path: &Path) -> Result<Vec<Vec<String>>> {
    let contents = fs::read_to_string(path).map_err(|err| read_error(path, err))?;
    let raw_rows = contents
        .lines()
        .map(|line| match line.find(COMMENT_MARKER) {
            Some(pos) => &line[..pos],
            None => line,
        })
        .map(|line| {
            line.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    Ok(raw_rows)
}

fn split_header(raw_rows: Vec<Vec<String>>, named: bool) -> Result<RawTable> {
    let mut rows = raw_rows.into_iter();
    let headers = if named {
        rows.next()
            .map(|row| row.iter().map(|value| normalize_header(value)).collect::<Vec<_>>())
    } else {
        None
    };
    let cells: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(|value| normalize_cell(value)).collect())
        .collect();
    let grid = match (&headers, cells.is_empty()) {
        (Some(headers), true) => CellGrid::empty(headers.len()),
        _ => CellGrid::from_rows(cells)?,
    };
    Ok(RawTable { headers, grid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_whitespace_is_collapsed() {
        assert_eq!(normalize_header("\u{feff} Eye   colour "), "Eye colour");
    }

    #[test]
    fn header_row_is_split_off() {
        let raw = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["1".to_string(), "x".to_string()],
        ];
        let table = split_header(raw, true).unwrap();
        assert_eq!(table.headers, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(table.grid.shape(), [1, 2]);
        assert_eq!(table.grid.get(0, 1), Some(&Cell::label("x")));
    }

    #[test]
    fn header_only_file_keeps_column_count() {
        let raw = vec![vec!["a".to_string(), "b".to_string(), "n".to_string()]];
        let table = split_header(raw, true).unwrap();
        assert_eq!(table.grid.shape(), [0, 3]);
    }
}
