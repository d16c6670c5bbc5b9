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

//! Configuration table loading.

use crate::error::{LoadError, Result};
use crate::table::Table;
use formation_core::{Cell, Dataset};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const HEADER_ROWS: [&str; 5] = ["comment", "formation", "ops", "key", "type"];

/// Configuration for table loading.
///
/// # Examples
///
/// ```
/// use formation_csv::LoadConfig;
///
/// let config = LoadConfig {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// assert_eq!(config.max_rows, 1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Whether to trim whitespace around fields (default: `false`).
    pub trim: bool,
    /// Maximum number of data rows, not counting header rows
    /// (default: 1,000,000).
    pub max_rows: usize,
    /// Ops-row values whose columns are left out of the dataset
    /// (default: `client`, `none`).
    pub dropped_ops: Vec<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            max_rows: 1_000_000,
            dropped_ops: vec!["client".to_string(), "none".to_string()],
        }
    }
}

/// Declared type of a column, from the type header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    String,
    /// Anything else; every cell loads as an empty string.
    Unknown,
}

impl ColumnType {
    /// Map a type-row value to a column type.
    pub fn from_header(name: &str) -> Self {
        match name {
            "int" | "int32" | "int64" => Self::Int,
            "double" => Self::Float,
            "string" => Self::String,
            _ => Self::Unknown,
        }
    }

    /// Convert raw cell text. Unparsable numbers load as zero.
    pub fn parse(self, raw: &str) -> Cell {
        match self {
            Self::Int => Cell::Int(parse_int(raw).unwrap_or(0)),
            Self::Float => Cell::Float(raw.parse().unwrap_or(0.0)),
            Self::String => Cell::from(raw),
            Self::Unknown => Cell::from(""),
        }
    }
}

/// Parse an integer with an optional sign and `0x`, `0o`, `0b` or
/// leading-zero octal prefix.
pub fn parse_int(raw: &str) -> Option<i64> {
    let (sign, unsigned) = match raw.as_bytes().first()? {
        b'-' => ("-", &raw[1..]),
        b'+' => ("", &raw[1..]),
        _ => ("", raw),
    };

    let lower = unsigned.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lower.as_deref() {
        Some("0x") => (16, &unsigned[2..]),
        Some("0o") => (8, &unsigned[2..]),
        Some("0b") => (2, &unsigned[2..]),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    i64::from_str_radix(&format!("{}{}", sign, digits), radix).ok()
}

struct Column {
    source: usize,
    kind: ColumnType,
}

/// Load a table from CSV in the five-header-row layout.
///
/// # Errors
///
/// Returns `MissingHeader` if the input ends inside the header rows,
/// `SecurityLimit` past `config.max_rows` data rows, and `Parse` or `Io`
/// for reader failures.
pub fn load_table<R: Read>(name: impl Into<String>, reader: R, config: &LoadConfig) -> Result<Table> {
    let name = name.into();
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let mut records = csv_reader.records();
    let mut headers = Vec::with_capacity(HEADER_ROWS.len());
    for header in HEADER_ROWS {
        let record = records.next().ok_or(LoadError::MissingHeader(header))??;
        headers.push(record);
    }
    let (notes, ops, keys, types) = (&headers[1], &headers[2], &headers[3], &headers[4]);

    let mut dataset = Dataset::new();
    let mut formation_notes = BTreeMap::new();
    let mut columns = Vec::new();

    for (source, key) in keys.iter().enumerate() {
        let op = ops.get(source).unwrap_or("");
        if config.dropped_ops.iter().any(|dropped| dropped == op) {
            continue;
        }

        let index = columns.len();
        if dataset.format.insert(key.to_string(), index).is_some() {
            warn!(table = %name, column = key, "duplicate column, the last one wins");
        }
        formation_notes.insert(key.to_string(), notes.get(source).unwrap_or("").to_string());
        columns.push(Column {
            source,
            kind: ColumnType::from_header(types.get(source).unwrap_or("")),
        });
    }

    for (row, record) in records.enumerate() {
        if row >= config.max_rows {
            return Err(LoadError::SecurityLimit {
                limit: config.max_rows,
                actual: row + 1,
            });
        }

        let record = record?;
        let cells = columns
            .iter()
            .map(|column| column.kind.parse(record.get(column.source).unwrap_or("")))
            .collect();
        dataset.push_row(cells);
    }

    debug!(table = %name, columns = columns.len(), rows = dataset.len(), "loaded table");
    Ok(Table {
        name,
        dataset,
        formation_notes,
    })
}

/// Load a table from a string.
pub fn load_table_str(name: impl Into<String>, text: &str, config: &LoadConfig) -> Result<Table> {
    load_table(name, text.as_bytes(), config)
}

/// Load a table from a file; the table is named after the file stem.
pub fn load_table_path(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Table> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = std::fs::File::open(path)?;
    load_table(name, file, config)
}
