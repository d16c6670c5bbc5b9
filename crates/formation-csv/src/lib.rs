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

//! Loader for configuration tables in the five-header-row CSV layout.
//!
//! ```text
//! comment row         (ignored)
//! formation row       designer notes, may contain format(...)
//! ops row             client / none columns are dropped
//! key row             column names
//! type row            int, int32, int64, double, string
//! data rows...
//! ```
//!
//! Kept columns are numbered densely from 0, which becomes the dataset's
//! format.
//!
//! ```
//! use formation_csv::{load_table_str, LoadConfig};
//!
//! let text = "items\n,format(NpcCfg.id)\nserver,server\nid,npc\nint,int\n1,7\n";
//! let table = load_table_str("ItemCfg", text, &LoadConfig::default()).unwrap();
//!
//! assert_eq!(table.dataset.column("npc"), Some(1));
//! let (formations, errors) = table.formations();
//! assert_eq!(formations.len(), 1);
//! assert!(errors.is_empty());
//! ```

mod error;
mod load;
mod table;

pub use error::{LoadError, Result};
pub use load::{load_table, load_table_path, load_table_str, parse_int, ColumnType, LoadConfig};
pub use table::Table;
