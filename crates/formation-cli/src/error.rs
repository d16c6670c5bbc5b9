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

//! Structured error types for the formation CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Implements `Clone` so errors can cross rayon worker boundaries.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (file read or directory listing).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// A CSV table could not be loaded.
    #[error("Load error for '{path}': {message}")]
    Load {
        path: PathBuf,
        message: String,
    },

    /// A JSON dataset could not be decoded, or output could not be encoded.
    #[error("JSON error: {message}")]
    Json {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A formation given on the command line could not be built.
    #[error("Formation error: {0}")]
    Formation(String),

    /// Checks ran to completion and found problems.
    #[error("{count} reference error(s) found")]
    ReferenceErrors {
        /// Total number of errors across all formations
        count: usize,
    },
}

impl CliError {
    /// Create an I/O error with path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use formation_cli::error::CliError;
    ///
    /// let result = std::fs::read_dir("tables")
    ///     .map_err(|e| CliError::io_error("tables", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn load(path: impl Into<PathBuf>, source: formation_csv::LoadError) -> Self {
        Self::Load {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn json(message: impl ToString) -> Self {
        Self::Json {
            message: message.to_string(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err)
    }
}

impl From<formation_core::FormationError> for CliError {
    fn from(err: formation_core::FormationError) -> Self {
        Self::Formation(err.to_string())
    }
}
