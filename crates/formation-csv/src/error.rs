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

//! Error types for table loading.

use thiserror::Error;

/// Table loading error types.
///
/// # Examples
///
/// ```
/// use formation_csv::LoadError;
///
/// let err = LoadError::MissingHeader("type");
/// assert_eq!(err.to_string(), "Missing header row: type");
/// ```
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O error while reading a table.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV at a specific line.
    ///
    /// ```
    /// use formation_csv::LoadError;
    ///
    /// let err = LoadError::Parse {
    ///     line: 7,
    ///     message: "unequal lengths".to_string(),
    /// };
    /// assert!(err.to_string().contains("line 7"));
    /// ```
    #[error("CSV parse error at line {line}: {message}")]
    Parse {
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Detailed error message.
        message: String,
    },

    /// The table ended before one of its header rows.
    #[error("Missing header row: {0}")]
    MissingHeader(&'static str),

    /// Data row count exceeded the configured limit.
    #[error("Security limit exceeded: row count {actual} exceeds maximum {limit}")]
    SecurityLimit {
        /// Maximum allowed rows.
        limit: usize,
        /// Row count encountered.
        actual: usize,
    },
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        let line = err
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or_default();
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Parse { line, message },
        }
    }
}

/// Result type for table loading.
pub type Result<T> = std::result::Result<T, LoadError>;
