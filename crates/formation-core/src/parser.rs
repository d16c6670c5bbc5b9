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

//! Formation parser.
//!
//! Every constructor checks its own recognizer before building, so a node can
//! only exist in a shape the grammar accepts. Inputs are expected to be free
//! of whitespace; [`Formation::parse`](crate::Formation::parse) strips it.

use crate::error::{FormationError, FormationResult};
use crate::grammar::{classify, has_decoration, split_brackets, split_fullstop, Marker, PLACEHOLDER};
use crate::node::{BracketsNode, ColonNode, CommaNode, FullstopNode, Node, PerpendicularNode, SemicolonNode};
use crate::reference::FieldRef;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

fn mismatch(marker: Marker, text: &str) -> FormationError {
    FormationError::grammar_mismatch(format!(
        "'{}' does not match the {} marker",
        text, marker
    ))
}

/// Parse un-decorated text, classifying it Semicolon > Comma > Fullstop.
///
/// # Errors
///
/// Returns a `GrammarMismatch` error if no marker recognizes the text, or if
/// the recognized node's children do not parse.
pub fn parse_node(text: &str) -> FormationResult<Node> {
    let marker = classify(text).ok_or_else(|| {
        FormationError::grammar_mismatch(format!("formation '{}' does not match any marker", text))
    })?;
    debug!(%marker, formation = text, "classified formation");

    match marker {
        Marker::Semicolon => SemicolonNode::parse(text).map(Node::Semicolon),
        Marker::Comma => CommaNode::parse(text).map(Node::Comma),
        _ => FullstopNode::parse(text).map(Node::Fullstop),
    }
}

/// Parse a `|`-separated decoration.
///
/// # Errors
///
/// Returns `GrammarMismatch` for malformed branches and
/// `DecorationBranchConflict` for duplicate literals or disagreeing
/// discriminants.
pub fn parse_decoration(text: &str) -> FormationResult<PerpendicularNode> {
    PerpendicularNode::parse(text)
}

impl FullstopNode {
    /// Parse `File.Field` or the placeholder.
    pub fn parse(text: &str) -> FormationResult<Self> {
        if text == PLACEHOLDER {
            return Ok(Self {
                source: text.to_string(),
                target: None,
            });
        }

        let (file, field) = split_fullstop(text).ok_or_else(|| mismatch(Marker::Fullstop, text))?;
        Ok(Self {
            source: text.to_string(),
            target: Some(FieldRef::new(file, field)),
        })
    }
}

impl CommaNode {
    /// Parse comma pieces, collapsing them when they are all identical.
    pub fn parse(text: &str) -> FormationResult<Self> {
        if !Marker::Comma.recognizes(text) {
            return Err(mismatch(Marker::Comma, text));
        }

        let mut children = text
            .split(',')
            .map(FullstopNode::parse)
            .collect::<FormationResult<Vec<_>>>()?;

        let collapsed = children.windows(2).all(|pair| pair[0].source == pair[1].source);
        if collapsed {
            children.truncate(1);
        }

        Ok(Self {
            source: text.to_string(),
            children,
            collapsed,
        })
    }
}

impl SemicolonNode {
    /// Adopt the first comma-shaped group as the shape of every group.
    ///
    /// Later groups are not checked against the grammar.
    pub fn parse(text: &str) -> FormationResult<Self> {
        if !Marker::Semicolon.recognizes(text) {
            return Err(mismatch(Marker::Semicolon, text));
        }

        let group = text
            .split(';')
            .find(|group| Marker::Comma.recognizes(group))
            .ok_or_else(|| {
                FormationError::grammar_mismatch(format!(
                    "semicolon formation '{}' has no comma-shaped group",
                    text
                ))
            })?;

        Ok(Self {
            source: text.to_string(),
            child: CommaNode::parse(group)?,
        })
    }
}

impl BracketsNode {
    /// Parse `File.Field(literal)`.
    pub fn parse(text: &str) -> FormationResult<Self> {
        let (key, literal) = split_brackets(text).ok_or_else(|| mismatch(Marker::Brackets, text))?;
        let (file, field) = split_fullstop(key).ok_or_else(|| {
            FormationError::grammar_mismatch(format!(
                "bracket key '{}' does not match the {} marker",
                key,
                Marker::Fullstop
            ))
        })?;

        Ok(Self {
            source: text.to_string(),
            key: FieldRef::new(file, field),
            literal: literal.to_string(),
        })
    }
}

impl ColonNode {
    /// Parse `File.Field(literal):sub-formation`.
    pub fn parse(text: &str) -> FormationResult<Self> {
        let (key, value) = text
            .split_once(':')
            .filter(|_| Marker::Colon.recognizes(text))
            .ok_or_else(|| mismatch(Marker::Colon, text))?;

        Ok(Self {
            source: text.to_string(),
            key: BracketsNode::parse(key)?,
            value: parse_node(value)?,
        })
    }
}

impl PerpendicularNode {
    /// Parse decoration branches; all must share the first branch's discriminant.
    pub fn parse(text: &str) -> FormationResult<Self> {
        if !has_decoration(text) {
            return Err(mismatch(Marker::Perpendicular, text));
        }

        let mut discriminant: Option<FieldRef> = None;
        let mut branches = BTreeMap::new();

        for segment in text.split('|') {
            let branch = ColonNode::parse(segment)?;

            let expected = discriminant.get_or_insert_with(|| branch.key.key.clone());
            if *expected != branch.key.key {
                return Err(FormationError::branch_conflict(format!(
                    "branch '{}' selects on {} but the decoration selects on {}",
                    segment, branch.key.key, expected
                )));
            }

            match branches.entry(branch.key.literal.clone()) {
                Entry::Occupied(entry) => {
                    return Err(FormationError::branch_conflict(format!(
                        "branch literal '{}' already exists in decoration '{}'",
                        entry.key(),
                        text
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(branch);
                }
            }
        }

        let discriminant = discriminant.ok_or_else(|| mismatch(Marker::Perpendicular, text))?;
        Ok(Self {
            source: text.to_string(),
            discriminant,
            branches,
        })
    }
}
