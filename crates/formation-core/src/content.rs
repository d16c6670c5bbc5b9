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

//! Content extraction: reading one cell's text against a formation tree.

use crate::error::FormationError;
use crate::node::{ColonNode, CommaNode, FullstopNode, Node, SemicolonNode};
use crate::reference::ReferenceMap;

/// References found in content, plus any errors hit while reading it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Referenced values by target.
    pub references: ReferenceMap,
    /// Errors, in the order they were found.
    pub errors: Vec<FormationError>,
}

impl Extraction {
    /// Create an empty extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// An extraction holding a single error and no references.
    pub fn from_error(error: FormationError) -> Self {
        Self {
            references: ReferenceMap::new(),
            errors: vec![error],
        }
    }

    /// Append `other`'s references and errors after ours.
    pub fn merge(&mut self, other: Extraction) {
        self.references.merge(other.references);
        self.errors.extend(other.errors);
    }

    /// Returns true if no error was recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read cell content against a node.
pub trait ExtractContent {
    /// Extract every reference `content` encodes under this node's shape.
    fn extract(&self, content: &str) -> Extraction;
}

impl ExtractContent for FullstopNode {
    fn extract(&self, content: &str) -> Extraction {
        let mut extraction = Extraction::new();
        if let Some(target) = &self.target {
            extraction.references.push(target, content);
        }
        extraction
    }
}

impl ExtractContent for CommaNode {
    fn extract(&self, content: &str) -> Extraction {
        let pieces: Vec<&str> = content.split(',').collect();
        let mut extraction = Extraction::new();

        if self.collapsed {
            // Homogeneous list: every piece goes to the one target
            if let Some(target) = self.children.first().and_then(|child| child.target()) {
                for piece in pieces {
                    extraction.references.push(target, piece);
                }
            }
        } else if pieces.len() == self.children.len() {
            for (child, piece) in self.children.iter().zip(pieces) {
                if let Some(target) = child.target() {
                    extraction.references.push(target, piece);
                }
            }
        } else {
            extraction.errors.push(FormationError::length_mismatch(format!(
                "content '{}' has {} pieces but formation '{}' declares {}",
                content,
                pieces.len(),
                self.source,
                self.children.len()
            )));
        }

        extraction
    }
}

impl ExtractContent for SemicolonNode {
    fn extract(&self, content: &str) -> Extraction {
        let mut extraction = Extraction::new();
        for group in content.split(';') {
            extraction.merge(self.child.extract(group));
        }
        extraction
    }
}

/// The branch key is only consulted when selecting the branch.
impl ExtractContent for ColonNode {
    fn extract(&self, content: &str) -> Extraction {
        self.value.extract(content)
    }
}

impl ExtractContent for Node {
    fn extract(&self, content: &str) -> Extraction {
        match self {
            Self::Fullstop(n) => n.extract(content),
            Self::Comma(n) => n.extract(content),
            Self::Semicolon(n) => n.extract(content),
        }
    }
}
