//! Tabular containers fed into the preprocessing steps.
//!
//! [`FeatureFrame`] holds named, column-major feature data with optional
//! (missing) cells. A [`ColumnTransformer`](crate::preprocessing::ColumnTransformer)
//! slices it into a numeric block (`Array2<f64>`, missing as NaN) and a
//! [`CategoricalFrame`] of strings before handing each block to its steps.

use crate::preprocessing::error::PreprocessingError;
use ndarray::Array2;

/// A single named feature column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric values, one per row.
    Numeric(Vec<Option<f64>>),
    /// Categorical string values, one per row.
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Number of rows in this column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of missing cells.
    pub fn n_missing(&self) -> usize {
        match self {
            Column::Numeric(values) => values
                .iter()
                .filter(|v| v.map_or(true, |x| x.is_nan()))
                .count(),
            Column::Categorical(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    fn select_rows(&self, indices: &[usize]) -> Column {
        match self {
            Column::Numeric(values) => {
                Column::Numeric(indices.iter().map(|&i| values[i]).collect())
            }
            Column::Categorical(values) => {
                Column::Categorical(indices.iter().map(|&i| values[i].clone()).collect())
            }
        }
    }
}

/// Named, column-major table of mixed numeric and categorical features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureFrame {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl FeatureFrame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Every column must have the same number of rows.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), PreprocessingError> {
        let name = name.into();
        if self.index_of(&name).is_some() {
            return Err(PreprocessingError::InvalidParameter(format!(
                "duplicate column name {name:?}"
            )));
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(PreprocessingError::InconsistentRows {
                column: name,
                expected: self.n_rows,
                got: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Builder-style variant of [`push_column`](Self::push_column) for numeric data.
    pub fn with_numeric(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, PreprocessingError> {
        self.push_column(name, Column::Numeric(values))?;
        Ok(self)
    }

    /// Builder-style variant of [`push_column`](Self::push_column) for categorical data.
    pub fn with_categorical(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<String>>,
    ) -> Result<Self, PreprocessingError> {
        self.push_column(name, Column::Categorical(values))?;
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Position of the column called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index_of(name).map(|i| &self.columns[i])
    }

    /// Take the given rows (in the given order) from every column.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, PreprocessingError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_rows) {
            return Err(PreprocessingError::InvalidParameter(format!(
                "row index {bad} out of bounds for frame with {} rows",
                self.n_rows
            )));
        }
        Ok(Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.select_rows(indices)).collect(),
            n_rows: indices.len(),
        })
    }

    /// Gather numeric columns into a row-major matrix; missing cells become NaN.
    pub fn numeric_block(&self, columns: &[usize]) -> Result<Array2<f64>, PreprocessingError> {
        let mut block = Array2::from_elem((self.n_rows, columns.len()), f64::NAN);
        for (out_col, &idx) in columns.iter().enumerate() {
            match self.get(idx)? {
                Column::Numeric(values) => {
                    for (row, value) in values.iter().enumerate() {
                        if let Some(v) = value {
                            block[[row, out_col]] = *v;
                        }
                    }
                }
                Column::Categorical(_) => {
                    return Err(PreprocessingError::ColumnKind {
                        name: self.names[idx].clone(),
                        expected: "numeric",
                    })
                }
            }
        }
        Ok(block)
    }

    /// Gather categorical columns into a row-major [`CategoricalFrame`].
    pub fn categorical_block(
        &self,
        columns: &[usize],
    ) -> Result<CategoricalFrame, PreprocessingError> {
        let mut selected = Vec::with_capacity(columns.len());
        for &idx in columns {
            match self.get(idx)? {
                Column::Categorical(values) => selected.push(values),
                Column::Numeric(_) => {
                    return Err(PreprocessingError::ColumnKind {
                        name: self.names[idx].clone(),
                        expected: "categorical",
                    })
                }
            }
        }

        let cols = selected.len();
        let mut values = Vec::with_capacity(self.n_rows * cols);
        for row in 0..self.n_rows {
            for column in &selected {
                values.push(column[row].clone());
            }
        }
        CategoricalFrame::new(values, self.n_rows, cols)
    }

    fn get(&self, idx: usize) -> Result<&Column, PreprocessingError> {
        self.columns
            .get(idx)
            .ok_or_else(|| PreprocessingError::UnknownColumn(format!("index {idx}")))
    }
}

/// Row-major matrix of optional string categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoricalFrame {
    values: Vec<Option<String>>,
    rows: usize,
    cols: usize,
}

impl CategoricalFrame {
    /// Create a frame from row-major values.
    pub fn new(
        values: Vec<Option<String>>,
        rows: usize,
        cols: usize,
    ) -> Result<Self, PreprocessingError> {
        if values.len() != rows * cols {
            return Err(PreprocessingError::InvalidParameter(format!(
                "expected {} values for a {rows}x{cols} frame, got {}",
                rows * cols,
                values.len()
            )));
        }
        Ok(Self { values, rows, cols })
    }

    /// Convenience constructor from string-slice rows; `None` marks a missing cell.
    pub fn from_rows(rows: &[Vec<Option<&str>>]) -> Result<Self, PreprocessingError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(PreprocessingError::FeatureMismatch {
                    expected_features: cols,
                    got_features: rows[i].len(),
                });
            }
            values.extend(row.iter().map(|v| v.map(str::to_string)));
        }
        Self::new(values, rows.len(), cols)
    }

    /// Create an empty frame with `cols` columns.
    pub fn empty(cols: usize) -> Self {
        Self {
            values: Vec::new(),
            rows: 0,
            cols,
        }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell at `(row, col)`; `None` when missing.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.values[row * self.cols + col].as_deref()
    }

    /// Iterate the cells of one column top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.rows).map(move |row| self.get(row, col))
    }

    /// Same shape, with `f` applied to every cell.
    pub(crate) fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, Option<&str>) -> Option<String>,
    {
        let values = self
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| f(i % self.cols.max(1), v.as_deref()))
            .collect();
        Self {
            values,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
