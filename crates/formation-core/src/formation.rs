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

//! Formations: a parsed reference grammar bound to one `File.Field` column.

use crate::error::{FormationError, FormationResult};
use crate::grammar::{has_decoration, strip_whitespace, unwrap_formation};
use crate::node::{FormationNode, Node, PerpendicularNode};
use crate::parser::{parse_decoration, parse_node};
use crate::reference::FieldRef;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// The parsed tree of a formation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormationShape {
    /// Every row is read with the same tree.
    Plain(Node),
    /// Each row selects a branch by its discriminant value.
    Decorated(PerpendicularNode),
}

/// A column's declared reference grammar.
///
/// A `Formation` only exists once its tree has been built successfully, so
/// anything handed to [`relation_check`](Formation::relation_check) is
/// structurally valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formation {
    target: FieldRef,
    shape: FormationShape,
}

impl Formation {
    /// Parse `format(<body>)` text declared on `file.field`.
    ///
    /// # Errors
    ///
    /// Returns `GrammarMismatch` if the wrapper is missing, plus any error
    /// from [`Formation::from_body`].
    ///
    /// # Examples
    ///
    /// ```
    /// use formation_core::Formation;
    ///
    /// let formation = Formation::parse("ShopCfg", "items", "format(ItemCfg.id,PH)").unwrap();
    /// assert!(!formation.has_decoration());
    /// ```
    pub fn parse(
        file: impl Into<String>,
        field: impl Into<String>,
        text: &str,
    ) -> FormationResult<Self> {
        let target = FieldRef::new(file, field);
        let body = unwrap_formation(text).ok_or_else(|| {
            warn!(%target, text, "formation is not wrapped in format(...)");
            FormationError::grammar_mismatch(format!(
                "{} formation '{}' is not wrapped in format(...)",
                target, text
            ))
        })?;
        Self::build(target, body)
    }

    /// Build from the text inside `format(...)`. Whitespace is stripped first.
    ///
    /// # Errors
    ///
    /// Returns `GrammarMismatch` or `DecorationBranchConflict` when the tree
    /// cannot be built.
    pub fn from_body(
        file: impl Into<String>,
        field: impl Into<String>,
        body: &str,
    ) -> FormationResult<Self> {
        Self::build(FieldRef::new(file, field), body)
    }

    fn build(target: FieldRef, body: &str) -> FormationResult<Self> {
        let body = strip_whitespace(body);

        let shape = if has_decoration(&body) {
            parse_decoration(&body)
                .map(FormationShape::Decorated)
                .map_err(|err| setup_failure(&target, "decoration", err))?
        } else {
            parse_node(&body)
                .map(FormationShape::Plain)
                .map_err(|err| setup_failure(&target, "formation", err))?
        };

        debug!(%target, formation = %body, "built formation");
        Ok(Self { target, shape })
    }

    /// The file the formation is declared in.
    pub fn file(&self) -> &str {
        &self.target.file
    }

    /// The column the formation is declared on.
    pub fn field(&self) -> &str {
        &self.target.field
    }

    /// `file.field` as a pair.
    pub fn target(&self) -> &FieldRef {
        &self.target
    }

    pub fn shape(&self) -> &FormationShape {
        &self.shape
    }

    /// Returns true if rows select a branch by discriminant.
    pub fn has_decoration(&self) -> bool {
        matches!(self.shape, FormationShape::Decorated(_))
    }

    /// The plain tree, if not decorated.
    pub fn node(&self) -> Option<&Node> {
        match &self.shape {
            FormationShape::Plain(node) => Some(node),
            FormationShape::Decorated(_) => None,
        }
    }

    /// The decoration, if any.
    pub fn decoration(&self) -> Option<&PerpendicularNode> {
        match &self.shape {
            FormationShape::Decorated(decoration) => Some(decoration),
            FormationShape::Plain(_) => None,
        }
    }

    /// The whitespace-free body this formation was built from.
    pub fn source(&self) -> &str {
        match &self.shape {
            FormationShape::Plain(node) => node.source(),
            FormationShape::Decorated(decoration) => decoration.source(),
        }
    }

    /// Every target the formation may reference. A decoration also
    /// depends on its discriminant.
    pub fn static_references(&self) -> BTreeSet<FieldRef> {
        match &self.shape {
            FormationShape::Plain(node) => node.static_references(),
            FormationShape::Decorated(decoration) => {
                let mut refs = decoration.static_references();
                refs.insert(decoration.discriminant().clone());
                refs
            }
        }
    }
}

fn setup_failure(target: &FieldRef, what: &str, err: FormationError) -> FormationError {
    warn!(%target, error = %err, "could not build {} node", what);
    FormationError::new(
        err.kind,
        format!("{} could not build {} node: {}", target, what, err.message),
    )
}

/// Map each formation's file to the files it references.
///
/// Files with formations but no references still get an (empty) entry.
pub fn dependency_map<'a, I>(formations: I) -> BTreeMap<String, BTreeSet<String>>
where
    I: IntoIterator<Item = &'a Formation>,
{
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for formation in formations {
        let deps = map.entry(formation.file().to_string()).or_default();
        deps.extend(formation.static_references().into_iter().map(|r| r.file));
    }
    map
}
