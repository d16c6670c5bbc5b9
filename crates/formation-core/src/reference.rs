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

//! Reference targets and the aggregate reference mapping.

use std::collections::BTreeMap;
use std::fmt;

/// A `File.Field` reference target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRef {
    /// Dataset (file) name.
    pub file: String,
    /// Column name within that dataset.
    pub field: String,
}

impl FieldRef {
    /// Create a reference target.
    pub fn new(file: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.file, self.field)
    }
}

/// Referenced values grouped by target: `file -> field -> values`.
///
/// Files and fields iterate in sorted order. Each value list keeps insertion
/// order and duplicates; a value referenced twice is checked twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    files: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ReferenceMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one referenced value to the `file.field` bucket.
    pub fn push(&mut self, target: &FieldRef, value: impl Into<String>) {
        self.files
            .entry(target.file.clone())
            .or_default()
            .entry(target.field.clone())
            .or_default()
            .push(value.into());
    }

    /// Append-only union: every bucket of `other` is appended after ours.
    pub fn merge(&mut self, other: ReferenceMap) {
        for (file, fields) in other.files {
            let ours = self.files.entry(file).or_default();
            for (field, values) in fields {
                ours.entry(field).or_default().extend(values);
            }
        }
    }

    /// Values referenced in `file.field`, if any.
    pub fn get(&self, file: &str, field: &str) -> Option<&[String]> {
        self.files
            .get(file)
            .and_then(|fields| fields.get(field))
            .map(|values| values.as_slice())
    }

    /// Referenced file names, sorted.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(|file| file.as_str())
    }

    /// Fields referenced in `file` with their values, sorted by field.
    pub fn fields<'a>(&'a self, file: &str) -> impl Iterator<Item = (&'a str, &'a [String])> {
        self.files
            .get(file)
            .into_iter()
            .flat_map(|fields| fields.iter())
            .map(|(field, values)| (field.as_str(), values.as_slice()))
    }

    /// Every bucket as `(file, field, values)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.files.iter().flat_map(|(file, fields)| {
            fields
                .iter()
                .map(move |(field, values)| (file.as_str(), field.as_str(), values.as_slice()))
        })
    }

    /// Total number of referenced values across all buckets.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, _, values)| values.len()).sum()
    }

    /// Returns true if no value is referenced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ==================== FieldRef tests ====================

    #[test]
    fn test_field_ref_display() {
        assert_eq!(FieldRef::new("ItemCfg", "item_id").to_string(), "ItemCfg.item_id");
    }

    #[test]
    fn test_field_ref_ordering() {
        let a = FieldRef::new("A", "z");
        let b = FieldRef::new("B", "a");
        assert!(a < b);
    }

    // ==================== ReferenceMap tests ====================

    #[test]
    fn test_push_keeps_duplicates() {
        let target = FieldRef::new("A", "b");
        let mut map = ReferenceMap::new();
        map.push(&target, "1001");
        map.push(&target, "1001");
        assert_eq!(map.get("A", "b"), Some(&strings(&["1001", "1001"])[..]));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_merge_appends_left_first() {
        let ab = FieldRef::new("A", "b");
        let cd = FieldRef::new("C", "d");

        let mut left = ReferenceMap::new();
        left.push(&ab, "1");

        let mut right = ReferenceMap::new();
        right.push(&ab, "2");
        right.push(&cd, "3");

        left.merge(right);
        assert_eq!(left.get("A", "b"), Some(&strings(&["1", "2"])[..]));
        assert_eq!(left.get("C", "d"), Some(&strings(&["3"])[..]));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut map = ReferenceMap::new();
        map.push(&FieldRef::new("Zone", "id"), "1");
        map.push(&FieldRef::new("Item", "kind"), "2");
        map.push(&FieldRef::new("Item", "id"), "3");

        let buckets: Vec<_> = map.iter().map(|(file, field, _)| (file, field)).collect();
        assert_eq!(buckets, vec![("Item", "id"), ("Item", "kind"), ("Zone", "id")]);
        assert_eq!(map.files().collect::<Vec<_>>(), vec!["Item", "Zone"]);
        assert_eq!(map.fields("Item").count(), 2);
        assert_eq!(map.fields("Missing").count(), 0);
    }

    #[test]
    fn test_empty_map() {
        let map = ReferenceMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get("A", "b"), None);
    }
}
