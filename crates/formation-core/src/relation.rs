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

//! Relation checking: does every referenced value exist in its target column?

use crate::content::{ExtractContent, Extraction};
use crate::dataset::{Dataset, Datasets};
use crate::decoration::{self, missing_cell};
use crate::error::FormationError;
use crate::formation::{Formation, FormationShape};
use crate::node::Node;
use crate::reference::{FieldRef, ReferenceMap};
use std::collections::HashSet;
use tracing::debug;

/// Options for [`Formation::relation_check_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Plain-path cell values meaning "no reference". Decorations only
    /// skip empty content, regardless of this list.
    pub sentinels: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            sentinels: vec![String::new(), "0".to_string(), "-1".to_string()],
        }
    }
}

impl CheckOptions {
    fn is_sentinel(&self, content: &str) -> bool {
        self.sentinels.iter().any(|s| s == content)
    }
}

/// The outcome of checking one formation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationReport {
    pub file: String,
    pub field: String,
    /// Every error found, in discovery order.
    pub errors: Vec<FormationError>,
}

impl RelationReport {
    /// Returns true if no error was found.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Formation {
    /// Check the formation against `datasets` with default options.
    pub fn relation_check(&self, datasets: &Datasets) -> RelationReport {
        self.relation_check_with_options(datasets, &CheckOptions::default())
    }

    /// Check the formation against `datasets`.
    ///
    /// A missing own file or field is reported alone. Anything found after
    /// that is accumulated and the pass always runs to completion.
    pub fn relation_check_with_options(
        &self,
        datasets: &Datasets,
        options: &CheckOptions,
    ) -> RelationReport {
        let target = self.target();
        let report = |errors: Vec<FormationError>| RelationReport {
            file: target.file.clone(),
            field: target.field.clone(),
            errors,
        };

        let Some(dataset) = datasets.get(&target.file) else {
            return report(vec![FormationError::unknown_file(format!(
                "file {} does not exist",
                target.file
            ))]);
        };
        let Some(field_index) = dataset.column(&target.field) else {
            return report(vec![FormationError::unknown_field(format!(
                "{} does not exist in the format of {}",
                target, target.file
            ))]);
        };

        let mut extraction = match self.shape() {
            FormationShape::Plain(node) => {
                aggregate_plain(target, node, dataset, field_index, options)
            }
            FormationShape::Decorated(decoration) => {
                decoration::aggregate(target, decoration, dataset, field_index, datasets)
            }
        };

        let missing = check_existence(&extraction.references, datasets);
        extraction.errors.extend(missing);

        debug!(
            %target,
            references = extraction.references.len(),
            errors = extraction.errors.len(),
            "relation check finished"
        );
        report(extraction.errors)
    }
}

fn aggregate_plain(
    target: &FieldRef,
    node: &Node,
    dataset: &Dataset,
    field_index: usize,
    options: &CheckOptions,
) -> Extraction {
    let mut extraction = Extraction::new();
    for (row, cells) in dataset.data.iter().enumerate() {
        let Some(cell) = cells.get(field_index) else {
            extraction
                .errors
                .push(missing_cell(target, field_index).with_row(row));
            continue;
        };
        let content = cell.to_string();
        if options.is_sentinel(&content) {
            continue;
        }

        let mut found = node.extract(&content);
        for err in &mut found.errors {
            err.row = Some(row);
        }
        extraction.merge(found);
    }
    extraction
}

/// Report each referenced value missing from its target column, once per
/// occurrence. Unknown files and fields are reported once each.
fn check_existence(references: &ReferenceMap, datasets: &Datasets) -> Vec<FormationError> {
    let mut errors = Vec::new();

    for file in references.files() {
        let Some(dataset) = datasets.get(file) else {
            errors.push(FormationError::unknown_file(format!(
                "referenced file {} does not exist",
                file
            )));
            continue;
        };

        for (field, values) in references.fields(file) {
            let Some(index) = dataset.column(field) else {
                errors.push(FormationError::unknown_field(format!(
                    "referenced field {}.{} does not exist in the format of {}",
                    file, field, file
                )));
                continue;
            };

            let present: HashSet<String> = dataset
                .data
                .iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.to_string())
                .collect();

            errors.extend(
                values
                    .iter()
                    .filter(|value| !present.contains(value.as_str()))
                    .map(|value| {
                        FormationError::missing_reference(format!(
                            "{}.{} can not find content {}",
                            file, field, value
                        ))
                    }),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;
    use crate::error::FormationErrorKind;

    fn item_table(ids: &[i64]) -> Dataset {
        let mut dataset = Dataset::with_columns(["id", "name"]);
        for id in ids {
            dataset.push_row(vec![Cell::Int(*id), Cell::from(format!("item{}", id))]);
        }
        dataset
    }

    fn shop_table(items: &[&str]) -> Dataset {
        let mut dataset = Dataset::with_columns(["id", "items"]);
        for (i, items) in items.iter().enumerate() {
            dataset.push_row(vec![Cell::Int(i as i64 + 1), Cell::from(*items)]);
        }
        dataset
    }

    fn tables(shop: Dataset) -> Datasets {
        let mut datasets = Datasets::new();
        datasets.insert("ShopCfg".to_string(), shop);
        datasets.insert("ItemCfg".to_string(), item_table(&[1001, 1002, 1003]));
        datasets
    }

    fn shop_formation(body: &str) -> Formation {
        Formation::from_body("ShopCfg", "items", body).unwrap()
    }

    // ==================== Own column tests ====================

    #[test]
    fn test_missing_own_file_is_single_error() {
        let report = shop_formation("ItemCfg.id").relation_check(&Datasets::new());
        assert!(!report.is_ok());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FormationErrorKind::UnknownFile);
    }

    #[test]
    fn test_missing_own_field_is_single_error() {
        let formation = Formation::from_body("ShopCfg", "goods", "ItemCfg.id").unwrap();
        let report = formation.relation_check(&tables(shop_table(&["1001"])));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FormationErrorKind::UnknownField);
    }

    // ==================== Plain path tests ====================

    #[test]
    fn test_all_present_is_ok() {
        let report = shop_formation("ItemCfg.id,PH;ItemCfg.id,PH")
            .relation_check(&tables(shop_table(&["1001,5;1002,6", "1003,1"])));
        assert!(report.is_ok(), "{:?}", report.errors);
        assert_eq!(report.file, "ShopCfg");
        assert_eq!(report.field, "items");
    }

    #[test]
    fn test_missing_reference_per_occurrence() {
        let report = shop_formation("ItemCfg.id,ItemCfg.id")
            .relation_check(&tables(shop_table(&["1001,2001,2001", "2001"])));
        assert_eq!(report.errors.len(), 3);
        assert!(report
            .errors
            .iter()
            .all(|e| e.kind == FormationErrorKind::MissingReference));
        assert_eq!(report.errors[0].message, "ItemCfg.id can not find content 2001");
    }

    #[test]
    fn test_sentinels_are_skipped() {
        let report = shop_formation("ItemCfg.id")
            .relation_check(&tables(shop_table(&["", "0", "-1", "1001"])));
        assert!(report.is_ok(), "{:?}", report.errors);
    }

    #[test]
    fn test_custom_sentinels() {
        let options = CheckOptions {
            sentinels: vec!["none".to_string()],
        };
        let report = shop_formation("ItemCfg.id")
            .relation_check_with_options(&tables(shop_table(&["none", "0"])), &options);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].message, "ItemCfg.id can not find content 0");
    }

    #[test]
    fn test_length_mismatch_keeps_row() {
        let report = shop_formation("ItemCfg.id,PH")
            .relation_check(&tables(shop_table(&["1001,1", "1002"])));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FormationErrorKind::ContentLengthMismatch);
        assert_eq!(report.errors[0].row, Some(1));
    }

    #[test]
    fn test_integer_cells_compare_by_display() {
        let mut shop = Dataset::with_columns(["id", "items"]);
        shop.push_row(vec![Cell::Int(1), Cell::Int(1002)]);
        let report = shop_formation("ItemCfg.id").relation_check(&tables(shop));
        assert!(report.is_ok(), "{:?}", report.errors);
    }

    // ==================== Existence tests ====================

    #[test]
    fn test_missing_target_file_reported_once() {
        let report = shop_formation("ItemCfg.id,NpcCfg.id,PH")
            .relation_check(&tables(shop_table(&["1001,1,x", "9999,2,y"])));
        let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![FormationErrorKind::MissingReference, FormationErrorKind::UnknownFile]
        );
    }

    #[test]
    fn test_missing_target_field_reported_once() {
        let report = shop_formation("ItemCfg.code,ItemCfg.code")
            .relation_check(&tables(shop_table(&["1,2", "3"])));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, FormationErrorKind::UnknownField);
    }
}
