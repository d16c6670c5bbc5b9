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

//! End-to-end relation checks over small table sets.

use formation_core::{
    dependency_map, Cell, Dataset, Datasets, Formation, FormationErrorKind, ReferenceMap,
};

const REWARDS_FORMATION: &str = "format(
    RewardsPoolCfg.reward_type(1):RewardsGroupCfg.group_id,PH;RewardsGroupCfg.group_id,PH|
    RewardsPoolCfg.reward_type(2):RewardsGroupCfg.group_id,PH;RewardsGroupCfg.group_id,PH|
    RewardsPoolCfg.reward_type(3):RewardsGroupCfg.group_id,PH;RewardsGroupCfg.group_id,PH|
    RewardsPoolCfg.reward_type(4):RewardsGroupCfg.group_id,PH,PH;RewardsGroupCfg.group_id,PH,PH|
    RewardsPoolCfg.reward_type(5):RewardsGroupCfg.group_id,PH,PH;RewardsGroupCfg.group_id,PH,PH
)";

fn groups(ids: &[i64]) -> Dataset {
    let mut dataset = Dataset::with_columns(["group_id", "weight"]);
    for id in ids {
        dataset.push_row(vec![Cell::Int(*id), Cell::Int(100)]);
    }
    dataset
}

fn pool(rows: &[(i64, &str)]) -> Dataset {
    let mut dataset = Dataset::with_columns(["pool_id", "reward_type", "fixed_jackpot"]);
    for (i, (reward_type, jackpot)) in rows.iter().enumerate() {
        dataset.push_row(vec![
            Cell::Int(i as i64 + 1),
            Cell::Int(*reward_type),
            Cell::from(*jackpot),
        ]);
    }
    dataset
}

fn rewards_tables(rows: &[(i64, &str)]) -> Datasets {
    let mut datasets = Datasets::new();
    datasets.insert("RewardsPoolCfg".to_string(), pool(rows));
    datasets.insert("RewardsGroupCfg".to_string(), groups(&[10, 11, 12, 13]));
    datasets
}

fn rewards_formation() -> Formation {
    Formation::parse("RewardsPoolCfg", "fixed_jackpot", REWARDS_FORMATION).unwrap()
}

// ==================== Decoration tests ====================

#[test]
fn test_rewards_decoration_builds() {
    let formation = rewards_formation();
    assert!(formation.has_decoration());

    let decoration = formation.decoration().unwrap();
    assert_eq!(decoration.discriminant().to_string(), "RewardsPoolCfg.reward_type");
    let literals: Vec<_> = decoration.branches().map(|(literal, _)| literal).collect();
    assert_eq!(literals, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_rewards_decoration_all_present() {
    let datasets = rewards_tables(&[(1, "10,5;11,5"), (3, "12,1"), (4, "13,1,2;10,3,4")]);
    let report = rewards_formation().relation_check(&datasets);
    assert!(report.is_ok(), "{:?}", report.errors);
}

#[test]
fn test_rewards_branch_selects_shape() {
    // Type 4 rows are triples; a pair is a length mismatch under that branch
    let datasets = rewards_tables(&[(4, "10,5"), (2, "10,5")]);
    let report = rewards_formation().relation_check(&datasets);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, FormationErrorKind::ContentLengthMismatch);
    assert_eq!(report.errors[0].row, Some(0));
}

#[test]
fn test_rewards_unresolved_discriminant() {
    let datasets = rewards_tables(&[(3, "10,1"), (9, "99,1")]);
    let report = rewards_formation().relation_check(&datasets);

    assert_eq!(report.errors.len(), 1);
    let err = &report.errors[0];
    assert_eq!(err.kind, FormationErrorKind::UnresolvedDiscriminant);
    assert_eq!(
        err.message,
        "RewardsPoolCfg.fixed_jackpot reference value 9 from RewardsPoolCfg.reward_type does not exist"
    );
    assert_eq!(err.row, Some(1));
}

#[test]
fn test_rewards_missing_group() {
    let datasets = rewards_tables(&[(1, "10,5;77,5")]);
    let report = rewards_formation().relation_check(&datasets);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].message,
        "RewardsGroupCfg.group_id can not find content 77"
    );
}

#[test]
fn test_decoration_does_not_skip_zero() {
    let datasets = rewards_tables(&[(1, "0,5")]);
    let report = rewards_formation().relation_check(&datasets);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, FormationErrorKind::MissingReference);
}

#[test]
fn test_decoration_skips_empty_content_even_when_unresolved() {
    let datasets = rewards_tables(&[(9, "")]);
    assert!(rewards_formation().relation_check(&datasets).is_ok());
}

// ==================== Plain path tests ====================

fn shop_tables(goods: &[&str]) -> Datasets {
    let mut shop = Dataset::with_columns(["shop_id", "goods", "npc"]);
    for (i, g) in goods.iter().enumerate() {
        shop.push_row(vec![Cell::Int(i as i64), Cell::from(*g), Cell::Int(500)]);
    }

    let mut items = Dataset::with_columns(["item_id"]);
    for id in [1001, 1002, 1003] {
        items.push_row(vec![Cell::Int(id)]);
    }

    let mut datasets = Datasets::new();
    datasets.insert("ShopCfg".to_string(), shop);
    datasets.insert("ItemCfg".to_string(), items);
    datasets
}

#[test]
fn test_round_trip_every_reference_present() {
    let formation = Formation::parse("ShopCfg", "goods", "format(ItemCfg.item_id,PH;ItemCfg.item_id,PH)").unwrap();
    let report = formation.relation_check(&shop_tables(&["1001,1;1002,2", "1003,9"]));
    assert!(report.is_ok());
    assert!(report.errors.is_empty());
}

#[test]
fn test_sentinel_rows_never_error() {
    // Values that would be length mismatches if they were read
    let formation = Formation::parse("ShopCfg", "goods", "format(ItemCfg.item_id,PH)").unwrap();
    let report = formation.relation_check(&shop_tables(&["", "0", "-1"]));
    assert!(report.is_ok(), "{:?}", report.errors);
}

#[test]
fn test_missing_file_still_reports_resolvable_references() {
    let formation = Formation::parse(
        "ShopCfg",
        "goods",
        "format(ItemCfg.item_id,NpcCfg.npc_id,ItemCfg.code)",
    )
    .unwrap();
    let report = formation.relation_check(&shop_tables(&["1001,1,a", "4004,2,b"]));

    let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
    assert!(!report.is_ok());
    assert_eq!(
        kinds,
        vec![
            FormationErrorKind::UnknownField,
            FormationErrorKind::MissingReference,
            FormationErrorKind::UnknownFile,
        ]
    );
    assert_eq!(
        report
            .errors
            .iter()
            .filter(|e| e.kind == FormationErrorKind::UnknownFile)
            .count(),
        1
    );
}

#[test]
fn test_errors_accumulate_across_rows() {
    let formation = Formation::parse("ShopCfg", "goods", "format(ItemCfg.item_id,PH)").unwrap();
    let report = formation.relation_check(&shop_tables(&["2001,1", "1001", "2002,1"]));
    let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FormationErrorKind::ContentLengthMismatch,
            FormationErrorKind::MissingReference,
            FormationErrorKind::MissingReference,
        ]
    );
}

// ==================== Dependency tests ====================

#[test]
fn test_dependency_map_over_tables() {
    let formations = vec![
        rewards_formation(),
        Formation::parse("ShopCfg", "goods", "format(ItemCfg.item_id,PH)").unwrap(),
    ];
    let map = dependency_map(&formations);

    let rewards: Vec<_> = map["RewardsPoolCfg"].iter().map(String::as_str).collect();
    assert_eq!(rewards, vec!["RewardsGroupCfg", "RewardsPoolCfg"]);
    assert!(map["ShopCfg"].contains("ItemCfg"));
}

#[test]
fn test_reference_map_merge_preserves_left_first() {
    let target = formation_core::FieldRef::new("A", "b");
    let mut left = ReferenceMap::new();
    left.push(&target, "1");
    let mut right = ReferenceMap::new();
    right.push(&target, "2");
    right.push(&formation_core::FieldRef::new("C", "d"), "3");

    left.merge(right);
    assert_eq!(left.get("A", "b").unwrap(), &["1".to_string(), "2".to_string()]);
    assert_eq!(left.get("C", "d").unwrap(), &["3".to_string()]);
}
