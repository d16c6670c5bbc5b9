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

//! Formation grammar parser and relation checker for configuration tables.
//!
//! A formation is a small grammar declared on a table column that describes
//! how the column's cells reference rows of other tables:
//!
//! - `File.Field` - the whole cell is one reference
//! - `A.b,PH` - a comma tuple; `PH` positions are not references
//! - `A.b,A.b` - a homogeneous list of any length
//! - `A.b,PH;A.b,PH` - repeated groups of one comma shape
//! - `T.k(1):A.b|T.k(2):B.c` - a decoration, where the row's `T.k` value
//!   selects the branch
//!
//! ```
//! use formation_core::{Cell, Dataset, Datasets, Formation};
//!
//! let mut items = Dataset::with_columns(["id"]);
//! items.push_row(vec![Cell::Int(1001)]);
//!
//! let mut shop = Dataset::with_columns(["id", "goods"]);
//! shop.push_row(vec![Cell::Int(1), Cell::from("1001,5;1001,6")]);
//!
//! let mut datasets = Datasets::new();
//! datasets.insert("ItemCfg".to_string(), items);
//! datasets.insert("ShopCfg".to_string(), shop);
//!
//! let formation = Formation::parse("ShopCfg", "goods", "format(ItemCfg.id,PH;ItemCfg.id,PH)").unwrap();
//! assert!(formation.relation_check(&datasets).is_ok());
//! ```

mod content;
mod dataset;
mod decoration;
mod error;
mod formation;
pub mod grammar;
pub mod node;
mod parser;
mod reference;
mod relation;

pub use content::{ExtractContent, Extraction};
pub use dataset::{Cell, Dataset, Datasets};
pub use error::{FormationError, FormationErrorKind, FormationResult};
pub use formation::{dependency_map, Formation, FormationShape};
pub use grammar::{Marker, PLACEHOLDER};
pub use node::{FormationNode, Node, PerpendicularNode};
pub use parser::{parse_decoration, parse_node};
pub use reference::{FieldRef, ReferenceMap};
pub use relation::{CheckOptions, RelationReport};
