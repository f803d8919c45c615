//! CSV report loading.
//!
//! A report sheet is read exactly once into an in-memory matrix of strings.
//! Both the axis deciders (which need row- and column-oriented views of the
//! same data) and the traverser (which needs random access by position) work
//! off this one structure, so a file is never re-parsed per query.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// An immutable, fully materialized report sheet.
///
/// Rows may be ragged (CSV exports frequently drop trailing empty fields);
/// positions past the end of a short row read as missing rather than erroring.
#[derive(Debug, Clone)]
pub struct Sheet {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Load a CSV file into memory.
    ///
    /// No header contract is assumed; every record is data as far as this
    /// layer is concerned. Quoted fields (including embedded newlines) follow
    /// standard CSV rules.
    pub fn load(path: &Path) -> Result<Sheet, EngineError> {
        let file = File::open(path).map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| EngineError::Csv {
                path: path.to_path_buf(),
                source: e,
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Sheet {
            path: path.to_path_buf(),
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (widest row wins; rows may be ragged).
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell text at a physical position, if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Row-oriented view: one slice per row.
    pub fn row_slices(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    /// Column-oriented view: the same data, transposed. Ragged rows
    /// contribute only the cells they actually have.
    pub fn column_slices(&self) -> Vec<Vec<&str>> {
        let mut cols: Vec<Vec<&str>> = vec![Vec::new(); self.width()];
        for row in &self.rows {
            for (j, cell) in row.iter().enumerate() {
                cols[j].push(cell.as_str());
            }
        }
        cols
    }
}
