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

//! Extract command - read one content string against a formation

use crate::error::CliError;
use colored::Colorize;
use formation_core::grammar::unwrap_formation;
use formation_core::{ExtractContent, Extraction, Formation, FormationShape};

/// Parse `formation` and print the references `content` yields.
///
/// A decoration needs `discriminant` to pick its branch.
///
/// # Errors
///
/// Returns `Formation` if the formation cannot be built, `InvalidInput` for
/// a decoration without a discriminant, and `ReferenceErrors` if the
/// content does not fit the formation.
///
/// # Examples
///
/// ```no_run
/// use formation_cli::commands::extract;
///
/// # fn main() -> Result<(), formation_cli::error::CliError> {
/// extract("A.b,PH;A.b,PH", "1001,10;1002,20", None)?;
/// # Ok(())
/// # }
/// ```
pub fn extract(formation: &str, content: &str, discriminant: Option<&str>) -> Result<(), CliError> {
    let extraction = run_extract(formation, content, discriminant)?;

    for (file, field, values) in extraction.references.iter() {
        println!("{}.{}: {}", file.green(), field.green(), values.join(", "));
    }
    for err in &extraction.errors {
        println!("{} {}", "✗".red().bold(), err);
    }

    if extraction.errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::ReferenceErrors {
            count: extraction.errors.len(),
        })
    }
}

/// Build the formation and extract, without printing.
pub fn run_extract(
    formation: &str,
    content: &str,
    discriminant: Option<&str>,
) -> Result<Extraction, CliError> {
    let body = unwrap_formation(formation).unwrap_or(formation);
    let formation = Formation::from_body("Input", "content", body)?;

    match formation.shape() {
        FormationShape::Plain(node) => Ok(node.extract(content)),
        FormationShape::Decorated(decoration) => {
            let discriminant = discriminant.ok_or_else(|| {
                CliError::invalid_input(format!(
                    "decoration selects on {}; pass --discriminant",
                    decoration.discriminant()
                ))
            })?;
            Ok(decoration.resolve(formation.target(), discriminant, content))
        }
    }
}
