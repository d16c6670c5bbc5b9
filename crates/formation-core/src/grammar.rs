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

//! Grammar registry for the formation language.
//!
//! Each [`Marker`] owns one anchored recognizer. The registry is compiled once,
//! on first use, and is read-only afterwards; every parser in the process
//! shares it. Node construction for a recognized marker is the `match` in
//! [`parse_node`](crate::parse_node), so the set of grammar forms stays closed.
//!
//! Recognizers for un-decorated text are tried in [`PLAIN_PRECEDENCE`] order.
//! First match wins and there is no backtracking across levels.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Token marking a position that is not a reference.
pub const PLACEHOLDER: &str = "PH";

/// Classification order for un-decorated formations.
pub const PLAIN_PRECEDENCE: [Marker; 3] = [Marker::Semicolon, Marker::Comma, Marker::Fullstop];

/// A grammar marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `,` separates the pieces of a list or tuple.
    Comma,
    /// `.` separates `File.Field`.
    Fullstop,
    /// `:` separates a decoration branch key from its sub-formation.
    Colon,
    /// `;` separates repeated groups of the same shape.
    Semicolon,
    /// `|` separates decoration branches.
    Perpendicular,
    /// `File.Field(literal)` branch selector.
    Brackets,
}

impl Marker {
    /// The single-character delimiter; brackets are delimited by `(` `)` instead.
    pub fn delimiter(self) -> Option<char> {
        match self {
            Self::Comma => Some(','),
            Self::Fullstop => Some('.'),
            Self::Colon => Some(':'),
            Self::Semicolon => Some(';'),
            Self::Perpendicular => Some('|'),
            Self::Brackets => None,
        }
    }

    /// Whether the whole of `text` has this marker's shape.
    pub fn recognizes(self, text: &str) -> bool {
        REGISTRY.recognizer(self).is_match(text)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comma => write!(f, "comma"),
            Self::Fullstop => write!(f, "fullstop"),
            Self::Colon => write!(f, "colon"),
            Self::Semicolon => write!(f, "semicolon"),
            Self::Perpendicular => write!(f, "perpendicular"),
            Self::Brackets => write!(f, "brackets"),
        }
    }
}

struct GrammarRegistry {
    semicolon: Regex,
    comma: Regex,
    fullstop: Regex,
    colon: Regex,
    perpendicular: Regex,
    brackets: Regex,
    wrapper: Regex,
    whitespace: Regex,
}

impl GrammarRegistry {
    fn build() -> Self {
        Self {
            // Two or more segments, none holding `;`, `|` or whitespace
            semicolon: compile(r"^[^;|\s]+(?:;[^;|\s]+)+$"),
            // Two or more segments of identifier characters and dots
            comma: compile(r"^[-_.0-9A-Za-z]+(?:,[-_.0-9A-Za-z]+)+$"),
            fullstop: compile(r"^(?P<key>[-_0-9A-Za-z]+)\.(?P<value>[-_0-9A-Za-z]+)$"),
            colon: compile(r"^(?P<key>[^:\s]+):(?P<value>[^:\s]+)$"),
            perpendicular: compile(r"^[^|\s]+(?:\|[^|\s]+)+$"),
            brackets: compile(r"^(?P<key>[^()]+)\((?P<value>[^()]+)\)$"),
            wrapper: compile(r"(?s)format\((?P<body>.*)\)"),
            whitespace: compile(r"\s+"),
        }
    }

    fn recognizer(&self, marker: Marker) -> &Regex {
        match marker {
            Marker::Semicolon => &self.semicolon,
            Marker::Comma => &self.comma,
            Marker::Fullstop => &self.fullstop,
            Marker::Colon => &self.colon,
            Marker::Perpendicular => &self.perpendicular,
            Marker::Brackets => &self.brackets,
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid grammar pattern")
}

static REGISTRY: Lazy<GrammarRegistry> = Lazy::new(GrammarRegistry::build);

/// Classify un-decorated text by [`PLAIN_PRECEDENCE`].
pub fn classify(text: &str) -> Option<Marker> {
    PLAIN_PRECEDENCE
        .into_iter()
        .find(|marker| marker.recognizes(text))
}

/// Whether whitespace-free text is a decoration (two or more `|` branches).
pub fn has_decoration(text: &str) -> bool {
    Marker::Perpendicular.recognizes(text)
}

/// The interior of a `format( ... )` wrapper, captured verbatim.
pub fn unwrap_formation(text: &str) -> Option<&str> {
    REGISTRY
        .wrapper
        .captures(text)
        .and_then(|caps| caps.name("body"))
        .map(|body| body.as_str())
}

/// Remove every whitespace run, including newlines.
pub fn strip_whitespace(text: &str) -> String {
    REGISTRY.whitespace.replace_all(text, "").into_owned()
}

/// Split `File.Field` into its two halves.
pub(crate) fn split_fullstop(text: &str) -> Option<(&str, &str)> {
    let caps = REGISTRY.fullstop.captures(text)?;
    Some((caps.name("key")?.as_str(), caps.name("value")?.as_str()))
}

/// Split `key(literal)` into its two halves.
pub(crate) fn split_brackets(text: &str) -> Option<(&str, &str)> {
    let caps = REGISTRY.brackets.captures(text)?;
    Some((caps.name("key")?.as_str(), caps.name("value")?.as_str()))
}
