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

//! Refs command - static references and file dependencies

use crate::error::CliError;
use crate::tables::load_workspace;
use colored::Colorize;
use formation_core::dependency_map;
use formation_csv::LoadConfig;
use std::path::PathBuf;

/// Print each formation's possible targets, then which files each file
/// depends on. No rows are read.
///
/// # Errors
///
/// Returns `Err` if the inputs cannot be loaded.
pub fn refs(paths: &[PathBuf]) -> Result<(), CliError> {
    let workspace = load_workspace(paths, &LoadConfig::default())?;

    for formation in &workspace.formations {
        let targets: Vec<String> = formation
            .static_references()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!(
            "{} -> {}",
            formation.target().to_string().green(),
            targets.join(", ")
        );
    }

    println!();
    println!("{}", "Dependencies:".bold());
    for (file, deps) in dependency_map(&workspace.formations) {
        let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
        println!("  {}: {}", file.green(), deps.join(", "));
    }

    for (table, err) in &workspace.setup_errors {
        eprintln!("{} {} - {}", "✗".red().bold(), table, err);
    }
    Ok(())
}
