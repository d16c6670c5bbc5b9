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

//! Formation syntax tree.
//!
//! Nodes are built once by the parser and never mutated afterwards. Plain
//! formations are a [`Node`]; decorations are a [`PerpendicularNode`] whose
//! branches are [`ColonNode`]s keyed by their bracket literal.

use crate::grammar::Marker;
use crate::reference::FieldRef;
use std::collections::{BTreeMap, BTreeSet};

/// Capabilities shared by every formation node.
pub trait FormationNode {
    /// The formation text this node was parsed from.
    fn source(&self) -> &str;

    /// Every target this node could reference, placeholders excluded.
    fn static_references(&self) -> BTreeSet<FieldRef>;
}

/// A `File.Field` leaf, or the `PH` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullstopNode {
    pub(crate) source: String,
    pub(crate) target: Option<FieldRef>,
}

impl FullstopNode {
    /// Returns true if this position is not a reference.
    pub fn is_placeholder(&self) -> bool {
        self.target.is_none()
    }

    /// The referenced target, `None` for a placeholder.
    pub fn target(&self) -> Option<&FieldRef> {
        self.target.as_ref()
    }

    /// Key half (`File`).
    pub fn file(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.file.as_str())
    }

    /// Value half (`Field`).
    pub fn field(&self) -> Option<&str> {
        self.target.as_ref().map(|t| t.field.as_str())
    }
}

impl FormationNode for FullstopNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        self.target.iter().cloned().collect()
    }
}

/// A `,`-separated sequence of fullstop children.
///
/// When every child has the same source the node is collapsed to one
/// representative, meaning the content is a homogeneous list of that
/// reference. Otherwise piece *i* of the content maps to child *i*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommaNode {
    pub(crate) source: String,
    pub(crate) children: Vec<FullstopNode>,
    pub(crate) collapsed: bool,
}

impl CommaNode {
    /// Children in declaration order; exactly one when collapsed.
    pub fn children(&self) -> &[FullstopNode] {
        &self.children
    }

    /// Returns true if all declared pieces were identical.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

impl FormationNode for CommaNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        self.children
            .iter()
            .flat_map(|child| child.static_references())
            .collect()
    }
}

/// `;`-separated groups that all share one comma shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemicolonNode {
    pub(crate) source: String,
    pub(crate) child: CommaNode,
}

impl SemicolonNode {
    /// The shape every group is read with.
    pub fn child(&self) -> &CommaNode {
        &self.child
    }
}

impl FormationNode for SemicolonNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        self.child.static_references()
    }
}

/// `File.Field(literal)`: the discriminant value that selects a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketsNode {
    pub(crate) source: String,
    pub(crate) key: FieldRef,
    pub(crate) literal: String,
}

impl BracketsNode {
    /// The discriminant column.
    pub fn key(&self) -> &FieldRef {
        &self.key
    }

    /// The discriminant value selecting this branch.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl FormationNode for BracketsNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        BTreeSet::from([self.key.clone()])
    }
}

/// `File.Field(literal):sub-formation`, one decoration branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColonNode {
    pub(crate) source: String,
    pub(crate) key: BracketsNode,
    pub(crate) value: Node,
}

impl ColonNode {
    /// The branch selector.
    pub fn key(&self) -> &BracketsNode {
        &self.key
    }

    /// The sub-formation applied when this branch is selected.
    pub fn value(&self) -> &Node {
        &self.value
    }
}

impl FormationNode for ColonNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        let mut refs = self.key.static_references();
        refs.extend(self.value.static_references());
        refs
    }
}

/// `|`-separated decoration branches sharing one discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerpendicularNode {
    pub(crate) source: String,
    pub(crate) discriminant: FieldRef,
    pub(crate) branches: BTreeMap<String, ColonNode>,
}

impl PerpendicularNode {
    /// The column whose value selects a branch.
    pub fn discriminant(&self) -> &FieldRef {
        &self.discriminant
    }

    /// Branch selected by a discriminant display string.
    pub fn branch(&self, literal: &str) -> Option<&ColonNode> {
        self.branches.get(literal)
    }

    /// Branches ordered by literal.
    pub fn branches(&self) -> impl Iterator<Item = (&str, &ColonNode)> {
        self.branches.iter().map(|(literal, node)| (literal.as_str(), node))
    }
}

impl FormationNode for PerpendicularNode {
    fn source(&self) -> &str {
        &self.source
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        self.branches
            .values()
            .flat_map(|branch| branch.static_references())
            .collect()
    }
}

/// A plain (un-decorated) formation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Single reference or placeholder.
    Fullstop(FullstopNode),
    /// List or tuple of references.
    Comma(CommaNode),
    /// Repeated comma groups.
    Semicolon(SemicolonNode),
}

impl Node {
    /// The marker this node was classified as.
    pub fn marker(&self) -> Marker {
        match self {
            Self::Fullstop(_) => Marker::Fullstop,
            Self::Comma(_) => Marker::Comma,
            Self::Semicolon(_) => Marker::Semicolon,
        }
    }
}

impl FormationNode for Node {
    fn source(&self) -> &str {
        match self {
            Self::Fullstop(n) => n.source(),
            Self::Comma(n) => n.source(),
            Self::Semicolon(n) => n.source(),
        }
    }

    fn static_references(&self) -> BTreeSet<FieldRef> {
        match self {
            Self::Fullstop(n) => n.static_references(),
            Self::Comma(n) => n.static_references(),
            Self::Semicolon(n) => n.static_references(),
        }
    }
}
