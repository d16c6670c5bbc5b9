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

//! Decoration resolution.
//!
//! The discriminant is read from the same row as the content being checked,
//! at the column its `Field` names. This assumes the discriminant's file is
//! row-aligned with the formation's own file, which in practice means it is
//! the same file.

use crate::content::{ExtractContent, Extraction};
use crate::dataset::{Dataset, Datasets};
use crate::error::FormationError;
use crate::node::PerpendicularNode;
use crate::reference::FieldRef;
use tracing::debug;

impl PerpendicularNode {
    /// Extract `content` with the branch whose literal equals `discriminant`.
    ///
    /// `target` names the column being checked and only appears in the
    /// error when no branch matches.
    pub fn resolve(&self, target: &FieldRef, discriminant: &str, content: &str) -> Extraction {
        match self.branch(discriminant) {
            Some(branch) => branch.extract(content),
            None => Extraction::from_error(FormationError::unresolved_discriminant(format!(
                "{} reference value {} from {} does not exist",
                target, discriminant, self.discriminant
            ))),
        }
    }
}

/// Aggregate every row of `dataset` through `decoration`.
///
/// Only empty content is skipped on this path.
pub(crate) fn aggregate(
    target: &FieldRef,
    decoration: &PerpendicularNode,
    dataset: &Dataset,
    field_index: usize,
    datasets: &Datasets,
) -> Extraction {
    let discriminant = decoration.discriminant();
    let Some(discriminant_set) = datasets.get(&discriminant.file) else {
        return Extraction::from_error(FormationError::unknown_file(format!(
            "{} discriminant file {} does not exist",
            target, discriminant.file
        )));
    };
    let Some(discriminant_index) = discriminant_set.column(&discriminant.field) else {
        return Extraction::from_error(FormationError::unknown_field(format!(
            "{} discriminant {} does not exist in the format of {}",
            target, discriminant, discriminant.file
        )));
    };

    let mut extraction = Extraction::new();
    for (row, cells) in dataset.data.iter().enumerate() {
        let Some(content) = cells.get(field_index) else {
            extraction
                .errors
                .push(missing_cell(target, field_index).with_row(row));
            continue;
        };
        let content = content.to_string();
        if content.is_empty() {
            continue;
        }

        let Some(selector) = cells.get(discriminant_index) else {
            extraction
                .errors
                .push(missing_cell(discriminant, discriminant_index).with_row(row));
            continue;
        };

        let mut resolved = decoration.resolve(target, &selector.to_string(), &content);
        for err in &mut resolved.errors {
            err.row = Some(row);
        }
        extraction.merge(resolved);
    }

    debug!(
        %target,
        rows = dataset.len(),
        references = extraction.references.len(),
        errors = extraction.errors.len(),
        "aggregated decorated formation"
    );
    extraction
}

pub(crate) fn missing_cell(column: &FieldRef, index: usize) -> FormationError {
    FormationError::unknown_field(format!("{} has no cell at index {}", column, index))
}
