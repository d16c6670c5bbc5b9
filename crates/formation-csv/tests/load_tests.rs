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

//! Loading tables from disk and checking the formations they declare.

use formation_core::{Datasets, FormationErrorKind};
use formation_csv::{load_table_path, parse_int, LoadConfig, LoadError};
use proptest::prelude::*;
use std::fs;

const ITEM_CFG: &str = "\
items,,
,,
server,server,client
id,name,icon
int,string,string
1001,Sword,a.png
1002,Shield,b.png
0x3EB,Bow,c.png
";

const SHOP_CFG: &str = "\
shops,,,
,format(ItemCfg.id),\"format(ItemCfg.id,PH;ItemCfg.id,PH)\",
server,server,server,none
id,item,cost,note
int,int,string,string
1,1001,\"1001,5;1003,6\",x
2,0,\"1002,1\",y
3,-1,\"1009,1\",z
";

fn write_tables() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ItemCfg.csv"), ITEM_CFG).unwrap();
    fs::write(dir.path().join("ShopCfg.csv"), SHOP_CFG).unwrap();
    dir
}

#[test]
fn test_load_path_names_table_after_stem() {
    let dir = write_tables();
    let table = load_table_path(dir.path().join("ItemCfg.csv"), &LoadConfig::default()).unwrap();
    assert_eq!(table.name, "ItemCfg");
    assert_eq!(table.dataset.len(), 3);
    assert_eq!(table.dataset.column("icon"), None);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table_path(dir.path().join("Nope.csv"), &LoadConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_check_loaded_tables() {
    let dir = write_tables();
    let config = LoadConfig::default();
    let items = load_table_path(dir.path().join("ItemCfg.csv"), &config).unwrap();
    let shops = load_table_path(dir.path().join("ShopCfg.csv"), &config).unwrap();

    let (formations, errors) = shops.formations();
    assert!(errors.is_empty());
    assert_eq!(formations.len(), 2);

    let mut datasets = Datasets::new();
    datasets.insert(items.name.clone(), items.dataset);
    datasets.insert(shops.name.clone(), shops.dataset);

    let reports: Vec<_> = formations.iter().map(|f| f.relation_check(&datasets)).collect();

    // cost: 1003 loaded from 0x3EB exists, 1009 does not
    let cost = reports.iter().find(|r| r.field == "cost").unwrap();
    assert_eq!(cost.errors.len(), 1);
    assert_eq!(cost.errors[0].kind, FormationErrorKind::MissingReference);
    assert_eq!(cost.errors[0].message, "ItemCfg.id can not find content 1009");

    // item: 0 and -1 are sentinels
    let item = reports.iter().find(|r| r.field == "item").unwrap();
    assert!(item.is_ok(), "{:?}", item.errors);
}

proptest! {
    /// Property: decimal, hex and octal renderings parse back to the value.
    #[test]
    fn prop_parse_int_prefixed_forms(n in -1_000_000_i64..1_000_000) {
        let magnitude = n.unsigned_abs();
        let sign = if n < 0 { "-" } else { "" };
        prop_assert_eq!(parse_int(&n.to_string()), Some(n));
        prop_assert_eq!(parse_int(&format!("{}0x{:x}", sign, magnitude)), Some(n));
        prop_assert_eq!(parse_int(&format!("{}0o{:o}", sign, magnitude)), Some(n));
    }
}
