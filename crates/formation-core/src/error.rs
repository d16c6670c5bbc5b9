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

//! Error types for formation parsing and relation checking.

use std::fmt;
use thiserror::Error;

/// The kind of error raised while building or checking a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormationErrorKind {
    /// Dataset absent from the table set.
    UnknownFile,
    /// Column absent from a dataset's format, or missing from a row.
    UnknownField,
    /// Text did not match the recognizer required at a parsing step.
    GrammarMismatch,
    /// Duplicate branch literal or disagreeing discriminant across branches.
    DecorationBranchConflict,
    /// Comma content split into a different number of pieces than declared.
    ContentLengthMismatch,
    /// Row's discriminant value selects no decoration branch.
    UnresolvedDiscriminant,
    /// Extracted value does not exist in its target column.
    MissingReference,
}

impl FormationErrorKind {
    /// Parse-time kinds abort construction; everything else is a row-level finding.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::GrammarMismatch | Self::DecorationBranchConflict)
    }
}

impl fmt::Display for FormationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFile => write!(f, "UnknownFileError"),
            Self::UnknownField => write!(f, "UnknownFieldError"),
            Self::GrammarMismatch => write!(f, "GrammarMismatchError"),
            Self::DecorationBranchConflict => write!(f, "DecorationBranchConflictError"),
            Self::ContentLengthMismatch => write!(f, "ContentLengthMismatchError"),
            Self::UnresolvedDiscriminant => write!(f, "UnresolvedDiscriminantError"),
            Self::MissingReference => write!(f, "MissingReferenceError"),
        }
    }
}

/// An error raised while building or checking a formation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind}: {message}")]
pub struct FormationError {
    /// The kind of error.
    pub kind: FormationErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Data row the error was found in (0-based), when there is one.
    pub row: Option<usize>,
}

impl FormationError {
    /// Create a new error.
    pub fn new(kind: FormationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            row: None,
        }
    }

    /// Attach the data row the error was found in.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    // Convenience constructors for each error kind
    pub fn unknown_file(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::UnknownFile, message)
    }

    pub fn unknown_field(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::UnknownField, message)
    }

    pub fn grammar_mismatch(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::GrammarMismatch, message)
    }

    pub fn branch_conflict(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::DecorationBranchConflict, message)
    }

    pub fn length_mismatch(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::ContentLengthMismatch, message)
    }

    pub fn unresolved_discriminant(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::UnresolvedDiscriminant, message)
    }

    pub fn missing_reference(message: impl Into<String>) -> Self {
        Self::new(FormationErrorKind::MissingReference, message)
    }
}

/// Result type for formation operations.
pub type FormationResult<T> = Result<T, FormationError>;
