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

//! A loaded table and the formations declared on its columns.

use formation_core::grammar::unwrap_formation;
use formation_core::{Dataset, Formation, FormationError};
use std::collections::BTreeMap;

/// One configuration table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table name, used as the file in `File.Field` references.
    pub name: String,
    pub dataset: Dataset,
    /// Designer notes per kept column, verbatim.
    pub formation_notes: BTreeMap<String, String>,
}

impl Table {
    /// Build a formation for every column whose note has a `format(...)`
    /// wrapper. Columns without one are not checked.
    pub fn formations(&self) -> (Vec<Formation>, Vec<FormationError>) {
        let mut formations = Vec::new();
        let mut errors = Vec::new();

        for (column, note) in &self.formation_notes {
            if unwrap_formation(note).is_none() {
                continue;
            }
            match Formation::parse(&self.name, column, note) {
                Ok(formation) => formations.push(formation),
                Err(err) => errors.push(err),
            }
        }

        (formations, errors)
    }
}
