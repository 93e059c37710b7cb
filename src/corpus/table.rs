// In-memory subtitle table: a header row and string cells.

use std::fs::File;
use std::path::Path;


use crate::codec::delimited_reader;
use crate::error::{Result, StoreError};

/// One parsed NST file, or one program cut out of a flat export.
///
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty cells when parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NstTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl NstTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Parse a semicolon-delimited file with a header row.
    ///
    /// A row with more cells than the header is a parse error; a shorter row
    /// is padded.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
        let mut reader = delimited_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| StoreError::csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() {
            return Err(StoreError::Parse {
                path: path.to_path_buf(),
                line: 1,
                message: "missing header row".to_string(),
            });
        }

        let mut table = Self::new(headers);
        for record in reader.records() {
            let record = record.map_err(|e| StoreError::csv(path, e))?;
            if record.len() > table.headers.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(StoreError::Parse {
                    path: path.to_path_buf(),
                    line,
                    message: format!(
                        "expected {} fields, saw {}",
                        table.headers.len(),
                        record.len()
                    ),
                });
            }
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Append a row, padding it to the header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of the named column, top to bottom.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// Drop the first `n` columns (all of them if the table is narrower).
    pub fn drop_leading_columns(&mut self, n: usize) {
        let n = n.min(self.headers.len());
        self.headers.drain(..n);
        for row in &mut self.rows {
            row.drain(..n);
        }
    }

    /// Drop columns by name. Names that are not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .headers
            .iter()
            .map(|h| !names.contains(&h.as_str()))
            .collect();
        retain_by_mask(&mut self.headers, &keep);
        for row in &mut self.rows {
            retain_by_mask(row, &keep);
        }
    }
}

fn retain_by_mask(cells: &mut Vec<String>, keep: &[bool]) {
    let mut i = 0;
    cells.retain(|_| {
        let kept = keep.get(i).copied().unwrap_or(true);
        i += 1;
        kept
    });
}
