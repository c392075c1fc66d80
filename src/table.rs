//! # In-memory sequence table
//!
//! A small column-ordered table used as the exchange type between the reader,
//! the converters, the safety validator and the writers. Cells are either
//! numbers or free text; there is no "missing" representation because missing
//! and malformed values are coerced when the table is loaded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Numeric value (setpoints and machine codes)
    Number(f64),
    /// Text value (labels, notes, placeholders)
    Text(String),
}

impl Cell {
    /// Build a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Numeric view of the cell; text is parsed when it looks like a number.
    ///
    /// Non-finite results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Returns the text when this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }

    /// Coerce to a number, falling back to zero.
    pub fn to_number_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Coerce to a numeric cell, falling back to zero.
    pub fn coerce_numeric(&self) -> Cell {
        Cell::Number(self.to_number_or_zero())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

/// Render a number the way the controller expects: integral values without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Errors raised when building a table by hand.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TableError {
    /// A row does not have one cell per column
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidth {
        /// Zero-based row index
        row: usize,
        /// Number of cells supplied
        found: usize,
        /// Number of columns in the table
        expected: usize,
    },

    /// A column-major column has a different length than the first one
    #[error("Column {column} has {found} values, expected {expected}")]
    ColumnLength {
        /// Column name
        column: String,
        /// Number of values supplied
        found: usize,
        /// Length of the first column
        expected: usize,
    },

    /// Column name already present
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

/// Column-ordered table of test steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl SequenceTable {
    /// The empty-table sentinel: no columns, no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a table with the given header and no rows.
    pub fn with_columns<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            let column = column.into();
            if table.column_index(&column).is_some() {
                return Err(TableError::DuplicateColumn(column));
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    /// Build a table from a column-major description, as `(name, values)` pairs.
    ///
    /// All columns must have the same length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Cell>)>) -> Result<Self, TableError> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            names.push(name.into());
            data.push(values);
        }
        let mut table = Self::with_columns(names)?;
        let height = data.first().map(Vec::len).unwrap_or(0);
        for (name, values) in table.columns.iter().zip(&data) {
            if values.len() != height {
                return Err(TableError::ColumnLength {
                    column: name.clone(),
                    found: values.len(),
                    expected: height,
                });
            }
        }
        for row in 0..height {
            table.rows.push(data.iter().map(|values| values[row].clone()).collect());
        }
        Ok(table)
    }

    /// Append a row; it must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// True when the table has neither columns nor rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (test steps).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// True if the column is present.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at (row, column name).
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Replace the cell at (row, column name). Returns false when either is absent.
    pub fn set(&mut self, row: usize, column: &str, value: impl Into<Cell>) -> bool {
        match (self.column_index(column), self.rows.get_mut(row)) {
            (Some(col), Some(r)) => {
                r[col] = value.into();
                true
            }
            _ => false,
        }
    }

    /// Iterate over the values of one column.
    pub fn column_values<'a>(&'a self, column: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Rename a column in place. No-op when `from` is absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<bool, TableError> {
        let Some(col) = self.column_index(from) else {
            return Ok(false);
        };
        if from != to && self.has_column(to) {
            return Err(TableError::DuplicateColumn(to.to_string()));
        }
        self.columns[col] = to.to_string();
        Ok(true)
    }

    /// Apply `f` to every cell of a column. No-op when the column is absent.
    pub fn map_column<F>(&mut self, column: &str, mut f: F) -> bool
    where
        F: FnMut(usize, &Cell) -> Cell,
    {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        for (i, row) in self.rows.iter_mut().enumerate() {
            row[col] = f(i, &row[col]);
        }
        true
    }

    /// Insert a column at `index` filled by `f(row)`.
    pub fn insert_column<F>(&mut self, index: usize, name: &str, mut f: F) -> Result<(), TableError>
    where
        F: FnMut(usize) -> Cell,
    {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        let index = index.min(self.columns.len());
        self.columns.insert(index, name.to_string());
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.insert(index, f(i));
        }
        Ok(())
    }

    /// Remove a column and return its values.
    pub fn remove_column(&mut self, name: &str) -> Option<Vec<Cell>> {
        let col = self.column_index(name)?;
        self.columns.remove(col);
        Some(self.rows.iter_mut().map(|row| row.remove(col)).collect())
    }
}
