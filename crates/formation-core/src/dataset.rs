// Dweve Formation - Referential integrity checks for configuration tables
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dataset model consumed by the relation checker.
//!
//! A [`Dataset`] is one exported configuration table: a column-name to index
//! map (`Format`) and the rows themselves (`Data`). The checker only ever
//! reads datasets; how they were loaded is the caller's business.

use std::collections::HashMap;
use std::fmt;

/// A loosely typed cell value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Cell {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    String(String),
}

impl Cell {
    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The display-string form is what gets compared against references.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// One configuration table.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    /// Column name to column index.
    #[cfg_attr(feature = "serde", serde(rename = "Format"))]
    pub format: HashMap<String, usize>,
    /// Rows, each aligned to the indices in `format`.
    #[cfg_attr(feature = "serde", serde(rename = "Data"))]
    pub data: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset whose format numbers `columns` from 0 in order.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let format = columns
            .into_iter()
            .enumerate()
            .map(|(index, name)| (name.into(), index))
            .collect();
        Self {
            format,
            data: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.data.push(row);
    }

    /// Index of a column, if the format declares it.
    pub fn column(&self, field: &str) -> Option<usize> {
        self.format.get(field).copied()
    }

    /// Cell at `row`, `index`; `None` when either is out of range.
    pub fn cell(&self, row: usize, index: usize) -> Option<&Cell> {
        self.data.get(row).and_then(|r| r.get(index))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The table set, keyed by file name.
pub type Datasets = HashMap<String, Dataset>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Cell tests ====================

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Int(1001).to_string(), "1001");
        assert_eq!(Cell::Int(-1).to_string(), "-1");
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Float(2.0).to_string(), "2");
        assert_eq!(Cell::from("1001,10").to_string(), "1001,10");
    }

    #[test]
    fn test_cell_accessors() {
        assert_eq!(Cell::Int(3).as_int(), Some(3));
        assert_eq!(Cell::from("x").as_int(), None);
        assert_eq!(Cell::from("x").as_str(), Some("x"));
        assert_eq!(Cell::Float(1.0).as_str(), None);
    }

    // ==================== Dataset tests ====================

    #[test]
    fn test_with_columns() {
        let ds = Dataset::with_columns(["id", "name", "ref"]);
        assert_eq!(ds.column("id"), Some(0));
        assert_eq!(ds.column("ref"), Some(2));
        assert_eq!(ds.column("missing"), None);
        assert!(ds.is_empty());
    }

    #[test]
    fn test_cell_out_of_range() {
        let mut ds = Dataset::with_columns(["id", "name"]);
        ds.push_row(vec![Cell::Int(1)]);
        assert_eq!(ds.cell(0, 0), Some(&Cell::Int(1)));
        assert_eq!(ds.cell(0, 1), None);
        assert_eq!(ds.cell(1, 0), None);
        assert_eq!(ds.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_dataset_json_shape() {
        let json = r#"{"Format":{"id":0,"name":1},"Data":[[1001,"sword"],[1002,2.5]]}"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.column("name"), Some(1));
        assert_eq!(ds.data[0][0], Cell::Int(1001));
        assert_eq!(ds.data[0][1], Cell::from("sword"));
        assert_eq!(ds.data[1][1], Cell::Float(2.5));
    }
}
